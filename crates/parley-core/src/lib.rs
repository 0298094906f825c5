//! # Parley Core
//!
//! Core traits and types for the Parley group-chat orchestration engine.
//! This crate provides the fundamental building blocks: validated agent
//! identities, immutable messages, the append-only conversation history,
//! the agent contract and roster, and the shared error taxonomy.
//!
//! The orchestration loop and its selection/termination strategies live in
//! `parley-chat`; this crate holds everything those strategies and the
//! loop agree on.

pub mod agent;
pub mod error;
pub mod history;
pub mod identity;
pub mod message;
pub mod tool;

pub use agent::{ChatAgent, Roster};
pub use error::{ChatError, ChatResult};
pub use history::ChatHistory;
pub use identity::{AgentName, InvalidAgentName, USER_AUTHOR};
pub use message::{Message, Role};
pub use tool::{ExecutionResult, InMemoryToolRegistry, Tool, ToolCall, ToolRegistry};
