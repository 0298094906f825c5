//! Run termination strategies.
//!
//! A termination strategy is consulted once per completed turn. The hard
//! iteration ceiling is orthogonal and enforced by the loop itself, so a
//! misbehaving agent can never keep a run alive past the configured
//! maximum.

use std::collections::HashSet;
use tracing::debug;

use parley_core::{AgentName, ChatHistory, Roster};

/// Policy deciding whether the run is complete.
pub trait TerminationStrategy: Send + Sync {
    /// Check whether the run should stop after the latest turn.
    fn should_terminate(&mut self, roster: &Roster, history: &ChatHistory) -> bool;

    /// Clear any strategy-internal state before a fresh run.
    fn reset(&mut self) {}
}

/// Single-confirmation termination.
///
/// Stops as soon as the most recent message contains the completion
/// marker, case-insensitively. Stateless.
pub struct MarkerTermination {
    marker: String,
}

impl MarkerTermination {
    /// Create a strategy matching the given marker.
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl TerminationStrategy for MarkerTermination {
    fn should_terminate(&mut self, _roster: &Roster, history: &ChatHistory) -> bool {
        history
            .last()
            .is_some_and(|last| last.contains_marker(&self.marker))
    }
}

/// All-agents confirmation termination.
///
/// Stops only once every roster member has produced a marker-bearing
/// message somewhere in the entire history, in any order. An agent that
/// confirmed early keeps counting even if another agent misbehaves later;
/// the run still blocks until all have confirmed.
///
/// The confirmed set persists across runs. The loop calls [`reset`] before
/// a fresh run when automatic reset is enabled; with it disabled, stale
/// confirmations from a prior run carry over.
///
/// [`reset`]: TerminationStrategy::reset
pub struct AllAgentsTermination {
    marker: String,
    confirmed: HashSet<AgentName>,
}

impl AllAgentsTermination {
    /// Create a strategy matching the given marker.
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            confirmed: HashSet::new(),
        }
    }

    /// Agents that have confirmed so far.
    pub fn confirmed(&self) -> impl Iterator<Item = &AgentName> {
        self.confirmed.iter()
    }
}

impl TerminationStrategy for AllAgentsTermination {
    fn should_terminate(&mut self, roster: &Roster, history: &ChatHistory) -> bool {
        for message in history.iter() {
            if roster.contains(&message.author) && message.contains_marker(&self.marker) {
                self.confirmed.insert(message.author.clone());
            }
        }
        let done = roster.names().all(|name| self.confirmed.contains(name));
        debug!(
            confirmed = self.confirmed.len(),
            roster = roster.len(),
            done,
            "all-agents confirmation check"
        );
        done
    }

    fn reset(&mut self) {
        self.confirmed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parley_core::{ChatAgent, ChatResult, Message};
    use std::sync::Arc;

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

    fn roster(names: &[&str]) -> Roster {
        Roster::new(
            names
                .iter()
                .map(|n| {
                    Arc::new(FixedAgent {
                        name: AgentName::new_unchecked(*n),
                    }) as Arc<dyn ChatAgent>
                })
                .collect(),
        )
        .unwrap()
    }

    fn agent_message(author: &str, content: &str) -> Message {
        Message::agent(AgentName::new_unchecked(author), content)
    }

    const MARKER: &str = "no action needed";

    #[test]
    fn test_marker_matches_latest_message() {
        let roster = roster(&["A"]);
        let mut strategy = MarkerTermination::new(MARKER);
        let mut history = ChatHistory::new();
        history.append(Message::user("x")).unwrap();
        history
            .append(agent_message("A", "No Action Needed."))
            .unwrap();
        assert!(strategy.should_terminate(&roster, &history));
    }

    #[test]
    fn test_marker_ignores_earlier_messages() {
        let roster = roster(&["A"]);
        let mut strategy = MarkerTermination::new(MARKER);
        let mut history = ChatHistory::new();
        history
            .append(agent_message("A", "no action needed"))
            .unwrap();
        history.append(agent_message("A", "wait, one more")).unwrap();
        assert!(!strategy.should_terminate(&roster, &history));
    }

    #[test]
    fn test_marker_empty_history() {
        let roster = roster(&["A"]);
        let mut strategy = MarkerTermination::new(MARKER);
        assert!(!strategy.should_terminate(&roster, &ChatHistory::new()));
    }

    #[test]
    fn test_all_agents_blocks_until_everyone_confirms() {
        let roster = roster(&["A", "B"]);
        let mut strategy = AllAgentsTermination::new(MARKER);
        let mut history = ChatHistory::new();
        history.append(Message::user("seed")).unwrap();
        history
            .append(agent_message("A", "no action needed"))
            .unwrap();
        assert!(!strategy.should_terminate(&roster, &history));

        // B misbehaves for a turn; A's early confirmation still counts.
        history.append(agent_message("B", "still thinking")).unwrap();
        assert!(!strategy.should_terminate(&roster, &history));

        history
            .append(agent_message("B", "ok, NO ACTION NEEDED"))
            .unwrap();
        assert!(strategy.should_terminate(&roster, &history));
    }

    #[test]
    fn test_all_agents_scans_full_history_not_just_tail() {
        let roster = roster(&["A", "B"]);
        let mut strategy = AllAgentsTermination::new(MARKER);
        let mut history = ChatHistory::new();
        history
            .append(agent_message("A", "no action needed"))
            .unwrap();
        history
            .append(agent_message("B", "no action needed"))
            .unwrap();
        history.append(agent_message("A", "chatter")).unwrap();
        // Confirmations sit mid-history; latest message has no marker.
        assert!(strategy.should_terminate(&roster, &history));
    }

    #[test]
    fn test_all_agents_ignores_non_roster_authors() {
        let roster = roster(&["A", "B"]);
        let mut strategy = AllAgentsTermination::new(MARKER);
        let mut history = ChatHistory::new();
        history
            .append(Message::user("no action needed"))
            .unwrap();
        history
            .append(agent_message("OUTSIDER", "no action needed"))
            .unwrap();
        assert!(!strategy.should_terminate(&roster, &history));
    }

    #[test]
    fn test_reset_clears_confirmations() {
        let roster = roster(&["A", "B"]);
        let mut strategy = AllAgentsTermination::new(MARKER);
        let mut history = ChatHistory::new();
        history
            .append(agent_message("A", "no action needed"))
            .unwrap();
        history
            .append(agent_message("B", "no action needed"))
            .unwrap();
        assert!(strategy.should_terminate(&roster, &history));

        strategy.reset();

        // Fresh run: empty history plus cleared state must not terminate.
        assert!(!strategy.should_terminate(&roster, &ChatHistory::new()));
    }

    #[test]
    fn test_stale_confirmations_persist_without_reset() {
        let roster = roster(&["A"]);
        let mut strategy = AllAgentsTermination::new(MARKER);
        let mut history = ChatHistory::new();
        history
            .append(agent_message("A", "no action needed"))
            .unwrap();
        assert!(strategy.should_terminate(&roster, &history));

        // No reset: an empty follow-up run still sees A confirmed.
        assert!(strategy.should_terminate(&roster, &ChatHistory::new()));
    }
}
