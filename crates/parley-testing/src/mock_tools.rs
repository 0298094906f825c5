//! Mock tools with recorded call history.
//!
//! Tool use is an agent-internal concern the orchestration engine never
//! sees, but scenario agents still need predictable tools to script
//! against. [`RecordingTool`] returns canned responses keyed by input and
//! records every call for assertions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use parley_core::{ExecutionResult, Tool};

/// A mock tool that returns predefined responses based on input.
#[derive(Clone)]
pub struct RecordingTool {
    name: String,
    responses: HashMap<String, ExecutionResult>,
    default_response: Option<ExecutionResult>,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl RecordingTool {
    /// Create a new recording tool with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            responses: HashMap::new(),
            default_response: None,
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a success response for a specific input.
    pub fn with_response(mut self, input: impl Into<String>, response: impl Into<String>) -> Self {
        self.responses
            .insert(input.into(), ExecutionResult::success(response));
        self
    }

    /// Add a failure response for a specific input.
    pub fn with_failure(mut self, input: impl Into<String>, reason: impl Into<String>) -> Self {
        self.responses
            .insert(input.into(), ExecutionResult::failure(reason));
        self
    }

    /// Set the response used for any unmatched input.
    pub fn with_default_response(mut self, response: impl Into<String>) -> Self {
        self.default_response = Some(ExecutionResult::success(response));
        self
    }

    /// Number of times this tool has been called.
    pub fn call_count(&self) -> usize {
        self.call_history.lock().unwrap().len()
    }

    /// Inputs passed to this tool, in call order.
    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().unwrap().clone()
    }

    /// Check if the tool was called with a specific input.
    pub fn was_called_with(&self, input: &str) -> bool {
        self.call_history
            .lock()
            .unwrap()
            .iter()
            .any(|i| i == input)
    }

    /// Clear the recorded call history.
    pub fn reset(&self) {
        self.call_history.lock().unwrap().clear();
    }
}

impl Tool for RecordingTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, input: String) -> ExecutionResult {
        self.call_history.lock().unwrap().push(input.clone());
        if let Some(response) = self.responses.get(&input) {
            response.clone()
        } else if let Some(default) = &self.default_response {
            default.clone()
        } else {
            ExecutionResult::success(format!("mock response for: {input}"))
        }
    }
}
