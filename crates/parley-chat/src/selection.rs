//! Next-agent selection strategies.
//!
//! A selection strategy decides which roster member acts next, as a
//! deterministic function of the roster and the current history: identical
//! inputs must always select the same agent. A strategy that cannot
//! resolve its target in the roster fails with
//! [`ChatError::NoEligibleAgent`] rather than picking an arbitrary member.

use std::sync::Arc;

use parley_core::{AgentName, ChatAgent, ChatError, ChatHistory, ChatResult, Role, Roster};

/// Policy choosing the next acting agent.
pub trait SelectionStrategy: Send + Sync {
    /// Select the single agent that should take the next turn.
    fn select<'r>(
        &mut self,
        roster: &'r Roster,
        history: &ChatHistory,
    ) -> ChatResult<&'r Arc<dyn ChatAgent>>;

    /// Clear any strategy-internal state before a fresh run.
    fn reset(&mut self) {}
}

/// Fixed-rotation selection with a designated primary responder.
///
/// The first name in the rotation order is the primary responder: it is
/// selected whenever the history is empty or the most recent message came
/// from the user. Otherwise the agent after the previous author in the
/// rotation takes the turn, wrapping around. With two agents this is a
/// ping-pong between primary and secondary.
pub struct RotationSelection {
    order: Vec<AgentName>,
}

impl RotationSelection {
    /// Create a rotation over the given order.
    ///
    /// The order must be non-empty; its first entry is the primary
    /// responder.
    pub fn new(order: Vec<AgentName>) -> ChatResult<Self> {
        if order.is_empty() {
            return Err(ChatError::InvalidConfig {
                reason: "rotation order must not be empty".to_string(),
            });
        }
        Ok(Self { order })
    }

    fn target(&self, history: &ChatHistory) -> ChatResult<&AgentName> {
        let primary = &self.order[0];
        match history.last() {
            None => Ok(primary),
            Some(last) if last.role == Role::User => Ok(primary),
            Some(last) => {
                let position = self
                    .order
                    .iter()
                    .position(|name| *name == last.author)
                    .ok_or_else(|| ChatError::NoEligibleAgent {
                        wanted: last.author.clone(),
                    })?;
                Ok(&self.order[(position + 1) % self.order.len()])
            }
        }
    }
}

impl SelectionStrategy for RotationSelection {
    fn select<'r>(
        &mut self,
        roster: &'r Roster,
        history: &ChatHistory,
    ) -> ChatResult<&'r Arc<dyn ChatAgent>> {
        let wanted = self.target(history)?.clone();
        roster.get(&wanted).ok_or(ChatError::NoEligibleAgent { wanted })
    }
}
