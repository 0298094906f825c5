//! Scripted agents with predictable behavior.
//!
//! Real agents call an external reasoning process; tests need fixed,
//! injectable responses instead. [`ScriptedAgent`] replays a canned reply
//! queue and records what it saw, and [`FailingAgent`] fails a configured
//! number of invocations before recovering, for exercising the bounded
//! retry policy.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use parley_core::{AgentName, ChatAgent, ChatError, ChatHistory, ChatResult, Message};

/// An agent that replays a fixed queue of replies.
///
/// When the queue runs out it repeats its final reply, so a run never
/// stalls on an exhausted script. Invocations are recorded for
/// assertions.
pub struct ScriptedAgent {
    name: AgentName,
    replies: Mutex<VecDeque<String>>,
    last_reply: Mutex<String>,
    invocations: AtomicU32,
    seen_history_lens: Mutex<Vec<usize>>,
    cleanups: AtomicU32,
}

impl ScriptedAgent {
    /// Create a scripted agent with no replies yet.
    ///
    /// Until a reply is queued the agent answers with an ellipsis.
    pub fn new(name: AgentName) -> Self {
        Self {
            name,
            replies: Mutex::new(VecDeque::new()),
            last_reply: Mutex::new("...".to_string()),
            invocations: AtomicU32::new(0),
            seen_history_lens: Mutex::new(Vec::new()),
            cleanups: AtomicU32::new(0),
        }
    }

    /// Queue a reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        let reply = reply.into();
        self.replies.lock().unwrap().push_back(reply.clone());
        *self.last_reply.lock().unwrap() = reply;
        self
    }

    /// Finish building, sharing the agent for later assertions.
    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Number of times `respond` was invoked.
    pub fn invocations(&self) -> u32 {
        self.invocations.load(Ordering::SeqCst)
    }

    /// History lengths observed at each invocation, in order.
    pub fn seen_history_lens(&self) -> Vec<usize> {
        self.seen_history_lens.lock().unwrap().clone()
    }

    /// Number of times `cleanup` was invoked.
    pub fn cleanup_count(&self) -> u32 {
        self.cleanups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatAgent for ScriptedAgent {
    fn name(&self) -> &AgentName {
        &self.name
    }

    async fn respond(&self, history: &ChatHistory) -> ChatResult<Message> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        self.seen_history_lens.lock().unwrap().push(history.len());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.last_reply.lock().unwrap().clone());
        Ok(Message::agent(self.name.clone(), reply))
    }

    async fn cleanup(&self) -> ChatResult<()> {
        self.cleanups.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// An agent that fails its first N invocations, then replies normally.
pub struct FailingAgent {
    name: AgentName,
    failures_left: AtomicU32,
    reply: String,
    cleanups: AtomicU32,
}

impl FailingAgent {
    /// Create an agent that fails `failures` times before replying with
    /// `reply` on every later invocation.
    pub fn new(name: AgentName, failures: u32, reply: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name,
            failures_left: AtomicU32::new(failures),
            reply: reply.into(),
            cleanups: AtomicU32::new(0),
        })
    }

    /// Number of times `cleanup` was invoked.
    pub fn cleanup_count(&self) -> u32 {
        self.cleanups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatAgent for FailingAgent {
    fn name(&self) -> &AgentName {
        &self.name
    }

    async fn respond(&self, _history: &ChatHistory) -> ChatResult<Message> {
        let remaining = self.failures_left.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_left.store(remaining - 1, Ordering::SeqCst);
            return Err(ChatError::AgentInvocation {
                agent: self.name.clone(),
                attempts: 1,
                reason: "scripted failure".to_string(),
            });
        }
        Ok(Message::agent(self.name.clone(), self.reply.clone()))
    }

    async fn cleanup(&self) -> ChatResult<()> {
        self.cleanups.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
