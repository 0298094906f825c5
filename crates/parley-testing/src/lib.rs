//! # Parley Testing
//!
//! Testing utilities for Parley orchestrations: scripted agents with
//! fixed, injectable replies, mock tools with recorded call history, and
//! a harness that runs seeded conversations to completion.
//!
//! The orchestration engine is deterministic given deterministic agent
//! outputs; these utilities supply exactly that, so tests never depend on
//! an external reasoning process or on randomness.

/// Chat harness for controlled end-to-end runs
pub mod harness;
/// Mock tools with recorded call history
pub mod mock_tools;
/// Scripted agents with predictable behavior
pub mod scripted;

pub use harness::{ChatHarness, Transcript, run_chat};
pub use mock_tools::RecordingTool;
pub use scripted::{FailingAgent, ScriptedAgent};

// Re-export commonly used types for convenience
pub use parley_chat::{ChatConfig, GroupChat, StopReason};
pub use parley_core::{AgentName, ChatAgent, ChatHistory, Message, Roster};
