//! Error types for Parley operations.
//!
//! The taxonomy distinguishes local, recoverable conditions (a malformed
//! append, a retryable agent failure) from conditions that are fatal to a
//! run (no eligible agent, retries exhausted). Fatal conditions always
//! surface to the caller with the partial history preserved; nothing is
//! silently swallowed.

use thiserror::Error;

use crate::identity::{AgentName, InvalidAgentName};

/// Errors that can occur while orchestrating a group chat.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChatError {
    /// A malformed message was rejected before it reached the history.
    #[error("invalid message: {reason}")]
    InvalidMessage {
        /// Why the message was rejected
        reason: String,
    },

    /// An agent name failed validation.
    #[error("invalid agent name: {0}")]
    InvalidAgentName(#[from] InvalidAgentName),

    /// Two roster entries share the same identity.
    #[error("duplicate agent in roster: {name}")]
    DuplicateAgent {
        /// The duplicated identity
        name: AgentName,
    },

    /// The selection strategy resolved a target that is not in the roster.
    ///
    /// This is a configuration error and is fatal to the run; the engine
    /// never silently substitutes an arbitrary agent.
    #[error("no eligible agent: '{wanted}' is not in the roster")]
    NoEligibleAgent {
        /// The identity the strategy asked for
        wanted: AgentName,
    },

    /// An external agent invocation failed after the configured retries.
    #[error("agent '{agent}' invocation failed after {attempts} attempt(s): {reason}")]
    AgentInvocation {
        /// The agent that failed
        agent: AgentName,
        /// Total attempts made, including retries
        attempts: u32,
        /// Description of the underlying failure
        reason: String,
    },

    /// The configuration was rejected during validation.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Why the configuration was rejected
        reason: String,
    },
}

impl ChatError {
    /// Get the error code suitable for logging or reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::InvalidMessage { .. } => "INVALID_MESSAGE",
            ChatError::InvalidAgentName(_) => "INVALID_AGENT_NAME",
            ChatError::DuplicateAgent { .. } => "DUPLICATE_AGENT",
            ChatError::NoEligibleAgent { .. } => "NO_ELIGIBLE_AGENT",
            ChatError::AgentInvocation { .. } => "AGENT_INVOCATION_FAILED",
            ChatError::InvalidConfig { .. } => "INVALID_CONFIG",
        }
    }

    /// Check if this error is fatal to a run in progress.
    ///
    /// Non-fatal errors are handled inside the loop (a rejected append, a
    /// retryable invocation failure); fatal errors end the run with the
    /// partial history preserved.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ChatError::NoEligibleAgent { .. } | ChatError::AgentInvocation { .. }
        )
    }
}

/// Result type for chat operations.
pub type ChatResult<T> = Result<T, ChatError>;
