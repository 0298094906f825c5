//! The architect review scenario agents.
//!
//! Deterministic stand-ins for the hosted reasoning agents of the
//! original workflow: the system architect composes a numbered tool
//! report from the seed message, the domain architect introduces itself,
//! and both confirm with the completion marker once they have nothing
//! left to do. Behavior depends only on the history, so repeated runs
//! need no agent-side reset.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use parley_chat::DEFAULT_COMPLETION_MARKER;
use parley_core::{
    AgentName, ChatAgent, ChatHistory, ChatResult, InMemoryToolRegistry, Message, Role, ToolCall,
    ToolRegistry,
};

use crate::tools::{NotificationTool, ResourceTypesTool, SolutionDesignTool};

/// Closed set of identities participating in the scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchitectRole {
    /// Primary responder; owns the lookup and notification tools
    SystemArchitect,
    /// Secondary responder; reviews and confirms
    DomainArchitect,
}

impl ArchitectRole {
    /// The identity used in the roster and strategies.
    pub fn agent_name(self) -> AgentName {
        AgentName::new_unchecked(self.as_str())
    }

    /// Stable identity string.
    pub fn as_str(self) -> &'static str {
        match self {
            ArchitectRole::SystemArchitect => "SYSTEM_ARCHITECT",
            ArchitectRole::DomainArchitect => "DOMAIN_ARCHITECT",
        }
    }
}

const SYSTEM_ARCHITECT_INSTRUCTIONS: &str = "\
You are a system architect.

Actions:
- Use the Solution Design Tool to retrieve the solution design link for the design name.
- Use the Resource Types Tool to retrieve resource types for the OAR Id Tag.
- Use the Notification Tool to notify the Domain Architect with the link and resource types.

If all actions have been completed or there are no further actions needed, \
respond with \"No action needed.\"";

const DOMAIN_ARCHITECT_INSTRUCTIONS: &str = "\
You are a domain architect.

Reply always only with \"I am a domain architect.\" the first time you are asked.

If all actions have been completed or there are no further actions needed, \
respond with \"No action needed.\"";

/// Extract single-quoted values from a seed message, in order.
fn quoted_values(text: &str) -> Vec<&str> {
    let mut values = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('\'') {
        let after = &rest[open + 1..];
        match after.find('\'') {
            Some(close) => {
                values.push(&after[..close]);
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    values
}

fn has_spoken(history: &ChatHistory, name: &AgentName) -> bool {
    history.iter().any(|m| m.author == *name)
}

fn last_user_content<'h>(history: &'h ChatHistory) -> Option<&'h str> {
    history
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
}

/// Primary responder: composes a numbered tool report on its first turn,
/// confirms on later turns.
pub struct SystemArchitectAgent {
    name: AgentName,
    registry: InMemoryToolRegistry,
}

impl SystemArchitectAgent {
    /// Create the agent with its three scenario tools registered.
    pub fn new() -> Self {
        Self {
            name: ArchitectRole::SystemArchitect.agent_name(),
            registry: InMemoryToolRegistry::new()
                .with_tool(Arc::new(SolutionDesignTool))
                .with_tool(Arc::new(ResourceTypesTool))
                .with_tool(Arc::new(NotificationTool)),
        }
    }

    fn report_line(&self, step: usize, friendly: &str, call: &ToolCall) -> String {
        match self.registry.dispatch(call) {
            Some(result) if result.is_success() => format!(
                "{step}. Tool Name: {friendly}, Tool Input: {input}, Tool Output: {output}",
                input = call.input,
                output = result.output(),
            ),
            Some(_) | None => format!("Cannot complete the {friendly} action."),
        }
    }

    fn compose_report(&self, seed: &str) -> String {
        let values = quoted_values(seed);
        let design_name = values.first().copied().unwrap_or_default();
        let oar_id = values.get(1).copied().unwrap_or_default();

        let design_call = ToolCall::new("solution_design", design_name);
        let resources_call = ToolCall::new("resource_types", oar_id);
        let design_line = self.report_line(1, "Solution Design Tool", &design_call);
        let resources_line = self.report_line(2, "Resource Types Tool", &resources_call);

        let notify_input = format!(
            "{}\n{}",
            self.registry
                .dispatch(&design_call)
                .map(|r| r.output().to_string())
                .unwrap_or_default(),
            self.registry
                .dispatch(&resources_call)
                .map(|r| r.output().to_string())
                .unwrap_or_default(),
        );
        let notify_line = self.report_line(
            3,
            "Notification Tool",
            &ToolCall::new("notify_architect", notify_input),
        );

        format!("{design_line}\n{resources_line}\n{notify_line}")
    }
}

impl Default for SystemArchitectAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatAgent for SystemArchitectAgent {
    fn name(&self) -> &AgentName {
        &self.name
    }

    fn instructions(&self) -> &str {
        SYSTEM_ARCHITECT_INSTRUCTIONS
    }

    async fn respond(&self, history: &ChatHistory) -> ChatResult<Message> {
        if has_spoken(history, &self.name) {
            debug!(agent = %self.name, "actions already reported, confirming");
            return Ok(Message::agent(self.name.clone(), "No action needed."));
        }
        let seed = last_user_content(history).unwrap_or_default();
        Ok(Message::agent(self.name.clone(), self.compose_report(seed)))
    }
}

/// Secondary responder: introduces itself once, then confirms.
pub struct DomainArchitectAgent {
    name: AgentName,
}

impl DomainArchitectAgent {
    /// Create the agent.
    pub fn new() -> Self {
        Self {
            name: ArchitectRole::DomainArchitect.agent_name(),
        }
    }
}

impl Default for DomainArchitectAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatAgent for DomainArchitectAgent {
    fn name(&self) -> &AgentName {
        &self.name
    }

    fn instructions(&self) -> &str {
        DOMAIN_ARCHITECT_INSTRUCTIONS
    }

    async fn respond(&self, history: &ChatHistory) -> ChatResult<Message> {
        let content = if has_spoken(history, &self.name) {
            "No action needed."
        } else {
            "I am a domain architect."
        };
        Ok(Message::agent(self.name.clone(), content))
    }
}

/// Marker the scenario agents confirm with.
pub const SCENARIO_MARKER: &str = DEFAULT_COMPLETION_MARKER;

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str =
        "The design name is 'Payment Processing System' and the OAR Id Tag is 'OAR-12345'.";

    #[test]
    fn test_quoted_values_extraction() {
        assert_eq!(
            quoted_values(SEED),
            vec!["Payment Processing System", "OAR-12345"]
        );
        assert!(quoted_values("no quotes here").is_empty());
        assert_eq!(quoted_values("one 'open quote"), Vec::<&str>::new());
    }

    #[tokio::test]
    async fn test_system_architect_reports_then_confirms() {
        let agent = SystemArchitectAgent::new();
        let mut history = ChatHistory::new();
        history.append(Message::user(SEED)).unwrap();

        let report = agent.respond(&history).await.unwrap();
        assert!(report.content.contains("1. Tool Name: Solution Design Tool"));
        assert!(report.content.contains("Payment Processing System"));
        assert!(report.content.contains("2. Tool Name: Resource Types Tool"));
        assert!(report.content.contains("OAR-12345"));
        assert!(report.content.contains("3. Tool Name: Notification Tool"));
        assert!(report.content.contains("Dear Domain Architect,"));

        history.append(report).unwrap();
        let second = agent.respond(&history).await.unwrap();
        assert!(second.contains_marker(SCENARIO_MARKER));
    }

    #[tokio::test]
    async fn test_system_architect_handles_missing_seed_values() {
        let agent = SystemArchitectAgent::new();
        let mut history = ChatHistory::new();
        history.append(Message::user("please review")).unwrap();

        let report = agent.respond(&history).await.unwrap();
        assert!(report.content.contains("Cannot complete the Solution Design Tool action."));
    }

    #[tokio::test]
    async fn test_domain_architect_introduces_then_confirms() {
        let agent = DomainArchitectAgent::new();
        let mut history = ChatHistory::new();
        history.append(Message::user(SEED)).unwrap();

        let intro = agent.respond(&history).await.unwrap();
        assert_eq!(intro.content, "I am a domain architect.");

        history.append(intro).unwrap();
        let second = agent.respond(&history).await.unwrap();
        assert!(second.contains_marker(SCENARIO_MARKER));
    }
}
