//! Chat message types.
//!
//! A [`Message`] is an immutable record of one contribution to the shared
//! conversation: who produced it, in which role, its text, and where it
//! sits on the timeline. The sequence index is assigned by the history on
//! append and is zero until then.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::AgentName;

/// Role of the message producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message seeded by the caller
    User,
    /// Message produced by an agent
    Agent,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Agent => write!(f, "agent"),
        }
    }
}

/// One contribution to the shared conversation timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Identity of the producer (an agent, or [`AgentName::user`])
    pub author: AgentName,
    /// Role of the producer
    pub role: Role,
    /// Free-text content; no schema is guaranteed
    pub content: String,
    /// Position on the timeline, assigned on append
    pub sequence: u64,
    /// Creation time
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a caller-seeded user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            author: AgentName::user(),
            role: Role::User,
            content: content.into(),
            sequence: 0,
            timestamp: Utc::now(),
        }
    }

    /// Create an agent reply attributed to `author`.
    pub fn agent(author: AgentName, content: impl Into<String>) -> Self {
        Self {
            author,
            role: Role::Agent,
            content: content.into(),
            sequence: 0,
            timestamp: Utc::now(),
        }
    }

    /// Case-insensitive substring check used by marker-based termination.
    pub fn contains_marker(&self, marker: &str) -> bool {
        self.content.to_lowercase().contains(&marker.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_has_reserved_author() {
        let msg = Message::user("hello");
        assert_eq!(msg.author, AgentName::user());
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.sequence, 0);
    }

    #[test]
    fn test_agent_message_attribution() {
        let name = AgentName::new_unchecked("SYSTEM_ARCHITECT");
        let msg = Message::agent(name.clone(), "done");
        assert_eq!(msg.author, name);
        assert_eq!(msg.role, Role::Agent);
    }

    #[test]
    fn test_contains_marker_is_case_insensitive() {
        let msg = Message::user("All good here. No Action Needed.");
        assert!(msg.contains_marker("no action needed"));
        assert!(msg.contains_marker("NO ACTION NEEDED"));
        assert!(!msg.contains_marker("escalate"));
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::Agent).unwrap(), "\"agent\"");
    }
}
