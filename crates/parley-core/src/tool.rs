//! Tool abstraction for agent-internal side effects.
//!
//! Agents may invoke named tools while producing a reply (lookups, log
//! writes, notifications). The orchestration engine never dispatches or
//! inspects tool use; it only ever sees the resulting reply text. This
//! module exists so agent implementations share one tool contract.

use std::collections::HashMap;
use std::sync::Arc;

/// A named tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    /// Name of the tool to invoke
    pub name: String,
    /// Free-form input passed to the tool
    pub input: String,
}

impl ToolCall {
    /// Create a tool call.
    pub fn new(name: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
        }
    }
}

/// Outcome of a tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    /// Tool executed successfully with the given output.
    Success {
        /// Output text of the tool
        output: String,
    },
    /// Tool execution failed.
    Failure {
        /// Description of the failure
        reason: String,
    },
}

impl ExecutionResult {
    /// Create a successful execution result.
    pub fn success(output: impl Into<String>) -> Self {
        ExecutionResult::Success {
            output: output.into(),
        }
    }

    /// Create a failed execution result.
    pub fn failure(reason: impl Into<String>) -> Self {
        ExecutionResult::Failure {
            reason: reason.into(),
        }
    }

    /// Check whether the invocation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success { .. })
    }

    /// Output text on success, failure reason otherwise.
    pub fn output(&self) -> &str {
        match self {
            ExecutionResult::Success { output } => output,
            ExecutionResult::Failure { reason } => reason,
        }
    }
}

/// An external capability an agent can invoke by name.
pub trait Tool: Send + Sync {
    /// Unique name used for registry dispatch.
    fn name(&self) -> &str;

    /// Human-readable description for listings.
    fn description(&self) -> &str {
        ""
    }

    /// Execute the tool with the provided input.
    fn call(&self, input: String) -> ExecutionResult;
}

/// Routes tool calls to registered implementations.
pub trait ToolRegistry {
    /// Dispatch a call to the named tool.
    ///
    /// Returns `None` if no tool with that name is registered.
    fn dispatch(&self, call: &ToolCall) -> Option<ExecutionResult>;

    /// Names of all registered tools.
    fn tool_names(&self) -> Vec<String>;
}

/// Simple in-memory tool registry.
#[derive(Clone, Default)]
pub struct InMemoryToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl InMemoryToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name.
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.insert(tool.name().to_string(), tool);
        self
    }
}

impl ToolRegistry for InMemoryToolRegistry {
    fn dispatch(&self, call: &ToolCall) -> Option<ExecutionResult> {
        self.tools
            .get(&call.name)
            .map(|tool| tool.call(call.input.clone()))
    }

    fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UppercaseTool;

    impl Tool for UppercaseTool {
        fn name(&self) -> &str {
            "uppercase"
        }

        fn call(&self, input: String) -> ExecutionResult {
            ExecutionResult::success(input.to_uppercase())
        }
    }

    #[test]
    fn test_registry_dispatches_by_name() {
        let registry = InMemoryToolRegistry::new().with_tool(Arc::new(UppercaseTool));
        let result = registry
            .dispatch(&ToolCall::new("uppercase", "hello"))
            .unwrap();
        assert!(result.is_success());
        assert_eq!(result.output(), "HELLO");
    }

    #[test]
    fn test_registry_unknown_tool_is_none() {
        let registry = InMemoryToolRegistry::new();
        assert!(registry.dispatch(&ToolCall::new("missing", "x")).is_none());
    }

    #[test]
    fn test_failure_result_carries_reason() {
        let result = ExecutionResult::failure("boom");
        assert!(!result.is_success());
        assert_eq!(result.output(), "boom");
    }
}
