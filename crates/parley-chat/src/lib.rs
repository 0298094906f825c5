//! # Parley Chat
//!
//! Turn-taking orchestration for a fixed roster of conversational agents.
//! The engine drives rounds over a shared append-only history: a
//! [`SelectionStrategy`] picks the next agent, the loop awaits its reply
//! and appends it, then a [`TerminationStrategy`] or the hard iteration
//! ceiling decides whether the run is over.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use parley_chat::{ChatConfig, GroupChat, MarkerTermination, RotationSelection};
//! use parley_core::{AgentName, Roster};
//!
//! let roster = Roster::new(agents)?;
//! let selection = RotationSelection::new(vec![
//!     AgentName::parse("PRIMARY")?,
//!     AgentName::parse("SECONDARY")?,
//! ])?;
//! let mut chat = GroupChat::new(
//!     roster,
//!     Box::new(selection),
//!     Box::new(MarkerTermination::new("no action needed")),
//!     ChatConfig::default(),
//! )?;
//!
//! let (replies, report) = chat.run_to_completion("seed message").await;
//! println!("stopped: {}", report.reason);
//! ```

pub mod chat;
pub mod config;
pub mod selection;
pub mod termination;

pub use chat::{CancelHandle, ChatEvent, GroupChat, RunReport, StopReason};
pub use config::{
    ChatConfig, DEFAULT_COMPLETION_MARKER, DEFAULT_MAXIMUM_ITERATIONS, RetryPolicy,
};
pub use selection::{RotationSelection, SelectionStrategy};
pub use termination::{AllAgentsTermination, MarkerTermination, TerminationStrategy};

// Re-export commonly used types from parley-core for convenience
pub use parley_core::{AgentName, ChatAgent, ChatError, ChatHistory, ChatResult, Message, Role, Roster};
