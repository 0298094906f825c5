//! Agent contract and roster.
//!
//! [`ChatAgent`] is the engine's only view of the agent runtime: given a
//! read-only history, produce exactly one reply. Reply generation is a
//! long-latency external call, so it is an explicit `async` suspend point
//! the orchestration loop awaits. Agents may invoke tools while producing
//! a reply; those side effects are entirely outside the engine's view.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{ChatError, ChatResult};
use crate::history::ChatHistory;
use crate::identity::AgentName;
use crate::message::Message;

/// A conversational agent participating in a group chat.
///
/// Implementations must not mutate the history; the orchestration loop
/// owns all mutation and only passes a shared reference.
#[async_trait]
pub trait ChatAgent: Send + Sync {
    /// The agent's unique identity within its roster.
    fn name(&self) -> &AgentName;

    /// Instruction text the agent was registered with.
    fn instructions(&self) -> &str {
        ""
    }

    /// Produce exactly one reply to the current conversation.
    ///
    /// May take arbitrary wall-clock time. The reply must carry the
    /// agent's own identity as author and the agent role; the loop
    /// rejects replies that do not.
    async fn respond(&self, history: &ChatHistory) -> ChatResult<Message>;

    /// Release any external resources the agent holds.
    ///
    /// The orchestration loop invokes this exactly once per run on every
    /// exit path; implementations must tolerate repeated calls across
    /// runs (idempotence).
    async fn cleanup(&self) -> ChatResult<()> {
        Ok(())
    }
}

/// The fixed set of agents participating in a run.
///
/// Built once at startup; there is no dynamic add or remove mid-run.
#[derive(Clone)]
pub struct Roster {
    agents: Vec<Arc<dyn ChatAgent>>,
}

impl Roster {
    /// Build a roster, rejecting duplicate identities.
    pub fn new(agents: Vec<Arc<dyn ChatAgent>>) -> ChatResult<Self> {
        for (i, agent) in agents.iter().enumerate() {
            if agents[..i].iter().any(|a| a.name() == agent.name()) {
                return Err(ChatError::DuplicateAgent {
                    name: agent.name().clone(),
                });
            }
        }
        Ok(Self { agents })
    }

    /// Look up an agent by identity.
    pub fn get(&self, name: &AgentName) -> Option<&Arc<dyn ChatAgent>> {
        self.agents.iter().find(|a| a.name() == name)
    }

    /// Check whether an identity is a roster member.
    pub fn contains(&self, name: &AgentName) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over the agents in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ChatAgent>> {
        self.agents.iter()
    }

    /// Identities of all members in registration order.
    pub fn names(&self) -> impl Iterator<Item = &AgentName> {
        self.agents.iter().map(|a| a.name())
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Check whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl std::fmt::Debug for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.agents.iter().map(|a| a.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedAgent {
        name: AgentName,
    }

    #[async_trait]
    impl ChatAgent for FixedAgent {
        fn name(&self) -> &AgentName {
            &self.name
        }

        async fn respond(&self, _history: &ChatHistory) -> ChatResult<Message> {
            Ok(Message::agent(self.name.clone(), "ok"))
        }
    }

    fn agent(name: &str) -> Arc<dyn ChatAgent> {
        Arc::new(FixedAgent {
            name: AgentName::new_unchecked(name),
        })
    }

    #[test]
    fn test_roster_lookup() {
        let roster = Roster::new(vec![agent("A"), agent("B")]).unwrap();
        assert_eq!(roster.len(), 2);
        assert!(roster.contains(&AgentName::new_unchecked("A")));
        assert!(!roster.contains(&AgentName::new_unchecked("C")));
    }

    #[test]
    fn test_roster_rejects_duplicates() {
        let err = Roster::new(vec![agent("A"), agent("A")]).unwrap_err();
        assert_eq!(err.error_code(), "DUPLICATE_AGENT");
    }

    #[test]
    fn test_roster_preserves_registration_order() {
        let roster = Roster::new(vec![agent("B"), agent("A")]).unwrap();
        let names: Vec<&str> = roster.names().map(AgentName::as_str).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[tokio::test]
    async fn test_default_cleanup_is_ok() {
        let roster = Roster::new(vec![agent("A")]).unwrap();
        for member in roster.iter() {
            assert!(member.cleanup().await.is_ok());
        }
    }
}
