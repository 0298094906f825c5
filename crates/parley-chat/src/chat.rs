//! The group chat orchestration loop.
//!
//! [`GroupChat`] drives rounds end-to-end: consult the selection strategy
//! for the next agent, await its reply, append it to the shared history,
//! then consult the termination strategy or the hard iteration ceiling.
//! Each run yields its replies lazily as a stream and always terminates
//! with an [`ChatEvent::Ended`] event carrying the stop reason.
//!
//! Scheduling is strictly turn-serialized: at most one agent invocation is
//! in flight, and a reply is appended before the next selection runs. The
//! history is single-writer (the loop) and multi-reader; each run gets its
//! own history instance.

use async_stream::stream;
use futures::{Stream, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use parley_core::{AgentName, ChatAgent, ChatError, ChatHistory, ChatResult, Message, Role, Roster};

use crate::config::ChatConfig;
use crate::selection::SelectionStrategy;
use crate::termination::TerminationStrategy;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The termination strategy approved completion.
    NormalTermination,
    /// The hard iteration ceiling cut the run off.
    IterationCeiling,
    /// The caller cancelled the run between rounds.
    Cancelled,
    /// A fatal error ended the run; the partial history is preserved.
    FatalError,
}

impl StopReason {
    /// Stable code for logging and reporting.
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::NormalTermination => "normal_termination",
            StopReason::IterationCeiling => "iteration_ceiling",
            StopReason::Cancelled => "cancelled",
            StopReason::FatalError => "fatal_error",
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// End-of-run report.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Unique identifier of the run
    pub run_id: Uuid,
    /// Why the run stopped
    pub reason: StopReason,
    /// Completed rounds
    pub rounds: u32,
    /// The fatal error, when [`StopReason::FatalError`]
    #[serde(skip)]
    pub error: Option<ChatError>,
}

/// Event yielded by [`GroupChat::invoke`].
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// An agent reply, in production order
    Reply(Message),
    /// End-of-run signal; always the final event
    Ended(RunReport),
}

/// Cloneable handle that cancels a run in progress between rounds.
///
/// Cancellation never interrupts a pending agent invocation; the run
/// stops before the next round starts, preserving every completed round.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Request cancellation of the run in progress.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Turn-taking orchestrator over a fixed roster of agents.
pub struct GroupChat {
    roster: Roster,
    selection: Box<dyn SelectionStrategy>,
    termination: Box<dyn TerminationStrategy>,
    config: ChatConfig,
    history: ChatHistory,
    rounds: u32,
    cancel: Arc<AtomicBool>,
}

impl GroupChat {
    /// Create a group chat over the given roster, strategies, and config.
    pub fn new(
        roster: Roster,
        selection: Box<dyn SelectionStrategy>,
        termination: Box<dyn TerminationStrategy>,
        config: ChatConfig,
    ) -> ChatResult<Self> {
        config.validate()?;
        if roster.is_empty() {
            return Err(ChatError::InvalidConfig {
                reason: "roster must not be empty".to_string(),
            });
        }
        Ok(Self {
            roster,
            selection,
            termination,
            config,
            history: ChatHistory::new(),
            rounds: 0,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    /// The conversation transcript of the most recent run.
    ///
    /// After a fatal stop this holds the partial history up to the last
    /// completed round.
    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    /// Completed rounds of the most recent run.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Handle for cancelling the active run between rounds.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            flag: Arc::clone(&self.cancel),
        }
    }

    /// Run a conversation seeded with `seed`, yielding each reply as it
    /// is produced.
    ///
    /// The stream is finite and not restartable mid-way; a fresh `invoke`
    /// starts a fresh run over a fresh history. The final event is always
    /// [`ChatEvent::Ended`]. Agent cleanup runs exactly once per run on
    /// every exit path before that final event.
    pub fn invoke(&mut self, seed: impl Into<String>) -> impl Stream<Item = ChatEvent> + '_ {
        let seed = seed.into();
        stream! {
            let run_id = Uuid::new_v4();
            info!(%run_id, agents = self.roster.len(), "starting group chat run");

            if self.config.automatic_reset {
                self.selection.reset();
                self.termination.reset();
            }
            self.history = ChatHistory::new();
            self.rounds = 0;
            self.cancel.store(false, Ordering::SeqCst);

            let mut error = None;
            let reason = 'run: {
                if let Err(e) = self.history.append(Message::user(seed)) {
                    error!(%run_id, code = e.error_code(), "seed rejected: {e}");
                    error = Some(e);
                    break 'run StopReason::FatalError;
                }

                loop {
                    if self.cancel.load(Ordering::SeqCst) {
                        info!(%run_id, rounds = self.rounds, "run cancelled between rounds");
                        break 'run StopReason::Cancelled;
                    }

                    let agent = match self.selection.select(&self.roster, &self.history) {
                        Ok(agent) => Arc::clone(agent),
                        Err(e) => {
                            error!(%run_id, code = e.error_code(), "selection failed: {e}");
                            error = Some(e);
                            break 'run StopReason::FatalError;
                        }
                    };
                    debug!(%run_id, agent = %agent.name(), round = self.rounds, "turn start");

                    let reply = match self.invoke_with_retry(agent.as_ref()).await {
                        Ok(reply) => reply,
                        Err(e) => {
                            error!(%run_id, code = e.error_code(), "turn aborted: {e}");
                            error = Some(e);
                            break 'run StopReason::FatalError;
                        }
                    };

                    if let Err(e) = Self::validate_reply(agent.name(), &reply) {
                        error!(%run_id, code = e.error_code(), "reply rejected: {e}");
                        error = Some(e);
                        break 'run StopReason::FatalError;
                    }

                    let appended = match self.history.append(reply) {
                        Ok(message) => message.clone(),
                        Err(e) => {
                            error!(%run_id, code = e.error_code(), "reply rejected: {e}");
                            error = Some(e);
                            break 'run StopReason::FatalError;
                        }
                    };
                    yield ChatEvent::Reply(appended);

                    self.rounds += 1;
                    if self.rounds >= self.config.maximum_iterations {
                        info!(%run_id, rounds = self.rounds, "iteration ceiling reached");
                        break 'run StopReason::IterationCeiling;
                    }
                    if self.termination.should_terminate(&self.roster, &self.history) {
                        break 'run StopReason::NormalTermination;
                    }
                }
            };

            self.run_cleanup().await;
            let report = RunReport {
                run_id,
                reason,
                rounds: self.rounds,
                error,
            };
            info!(%run_id, reason = reason.as_str(), rounds = report.rounds, "run ended");
            yield ChatEvent::Ended(report);
        }
    }

    /// Run to completion, collecting the replies and the final report.
    pub async fn run_to_completion(&mut self, seed: impl Into<String>) -> (Vec<Message>, RunReport) {
        let mut replies = Vec::new();
        let report = {
            let stream = self.invoke(seed);
            futures::pin_mut!(stream);
            let mut report = None;
            while let Some(event) = stream.next().await {
                match event {
                    ChatEvent::Reply(message) => replies.push(message),
                    ChatEvent::Ended(ended) => report = Some(ended),
                }
            }
            report
        };
        match report {
            Some(report) => (replies, report),
            // The stream contract guarantees a terminal Ended event.
            None => (
                replies,
                RunReport {
                    run_id: Uuid::nil(),
                    reason: StopReason::FatalError,
                    rounds: self.rounds,
                    error: None,
                },
            ),
        }
    }

    async fn invoke_with_retry(&self, agent: &dyn ChatAgent) -> ChatResult<Message> {
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            match agent.respond(&self.history).await {
                Ok(reply) => return Ok(reply),
                Err(err) => {
                    if attempts > self.config.retry.max_retries {
                        return Err(ChatError::AgentInvocation {
                            agent: agent.name().clone(),
                            attempts,
                            reason: err.to_string(),
                        });
                    }
                    warn!(
                        agent = %agent.name(),
                        attempts,
                        max_retries = self.config.retry.max_retries,
                        "agent invocation failed, retrying: {err}"
                    );
                    tokio::time::sleep(self.config.retry.backoff).await;
                }
            }
        }
    }

    /// A malformed reply is never appended; the run aborts instead.
    fn validate_reply(expected: &AgentName, reply: &Message) -> ChatResult<()> {
        if reply.role != Role::Agent {
            return Err(ChatError::InvalidMessage {
                reason: format!("reply role must be agent, got '{}'", reply.role),
            });
        }
        if reply.author != *expected {
            return Err(ChatError::InvalidMessage {
                reason: format!(
                    "reply author '{}' does not match invoked agent '{}'",
                    reply.author, expected
                ),
            });
        }
        Ok(())
    }

    async fn run_cleanup(&self) {
        for agent in self.roster.iter() {
            if let Err(err) = agent.cleanup().await {
                warn!(agent = %agent.name(), code = err.error_code(), "agent cleanup failed: {err}");
            }
        }
    }
}
