//! Chat harness for controlled end-to-end runs.
//!
//! Wires scripted agents, a rotation, and a termination strategy into a
//! [`GroupChat`], runs a seed to completion, and hands back a
//! [`Transcript`] with assertion helpers.

use std::sync::Arc;

use parley_chat::{
    ChatConfig, GroupChat, MarkerTermination, RotationSelection, RunReport, StopReason,
    TerminationStrategy,
};
use parley_core::{AgentName, ChatAgent, ChatResult, Message, Roster};

/// Outcome of a harness run.
#[derive(Debug)]
pub struct Transcript {
    /// Replies yielded by the run, in production order
    pub replies: Vec<Message>,
    /// The end-of-run report
    pub report: RunReport,
    /// The full history, seed included
    pub history: Vec<Message>,
}

impl Transcript {
    /// Author names of the replies, in order.
    pub fn author_sequence(&self) -> Vec<&str> {
        self.replies.iter().map(|m| m.author.as_str()).collect()
    }

    /// Number of replies produced.
    pub fn reply_count(&self) -> usize {
        self.replies.len()
    }

    /// Check the run stopped for the given reason.
    pub fn stopped_with(&self, reason: StopReason) -> bool {
        self.report.reason == reason
    }
}

/// Builder for a [`GroupChat`] over scripted agents.
pub struct ChatHarness {
    agents: Vec<Arc<dyn ChatAgent>>,
    rotation: Vec<AgentName>,
    termination: Option<Box<dyn TerminationStrategy>>,
    config: ChatConfig,
}

impl ChatHarness {
    /// Start an empty harness with default configuration.
    pub fn new() -> Self {
        Self {
            agents: Vec::new(),
            rotation: Vec::new(),
            termination: None,
            config: ChatConfig::default(),
        }
    }

    /// Add an agent; rotation order follows registration order.
    pub fn with_agent(mut self, agent: Arc<dyn ChatAgent>) -> Self {
        self.rotation.push(agent.name().clone());
        self.agents.push(agent);
        self
    }

    /// Replace the termination strategy (default: single-confirmation on
    /// the configured completion marker).
    pub fn with_termination(mut self, termination: Box<dyn TerminationStrategy>) -> Self {
        self.termination = Some(termination);
        self
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: ChatConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the underlying [`GroupChat`].
    pub fn build(self) -> ChatResult<GroupChat> {
        let marker = self.config.completion_marker.clone();
        let termination = self
            .termination
            .unwrap_or_else(|| Box::new(MarkerTermination::new(marker)));
        GroupChat::new(
            Roster::new(self.agents)?,
            Box::new(RotationSelection::new(self.rotation)?),
            termination,
            self.config,
        )
    }

    /// Build, run one seed to completion, and collect the transcript.
    pub async fn run(self, seed: impl Into<String>) -> ChatResult<Transcript> {
        let mut chat = self.build()?;
        Ok(run_chat(&mut chat, seed).await)
    }
}

impl Default for ChatHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one seed through an existing chat and collect the transcript.
///
/// Useful for asserting behavior across consecutive runs of the same
/// chat instance (strategy reset semantics).
pub async fn run_chat(chat: &mut GroupChat, seed: impl Into<String>) -> Transcript {
    let (replies, report) = chat.run_to_completion(seed).await;
    Transcript {
        replies,
        report,
        history: chat.history().messages().to_vec(),
    }
}
