//! Scenario agents and chat assembly.

pub mod architects;

pub use architects::{
    ArchitectRole, DomainArchitectAgent, SCENARIO_MARKER, SystemArchitectAgent,
};

use std::sync::Arc;

use parley_chat::{
    AllAgentsTermination, ChatConfig, GroupChat, MarkerTermination, RotationSelection,
    TerminationStrategy,
};
use parley_core::{ChatAgent, ChatResult, Roster};

/// Assemble the architect review chat.
///
/// The system architect is the primary responder; rotation ping-pongs
/// between it and the domain architect. `all_confirm` switches from
/// single-confirmation to all-agents confirmation.
pub fn build_architect_chat(config: ChatConfig, all_confirm: bool) -> ChatResult<GroupChat> {
    let roster = Roster::new(vec![
        Arc::new(SystemArchitectAgent::new()) as Arc<dyn ChatAgent>,
        Arc::new(DomainArchitectAgent::new()) as Arc<dyn ChatAgent>,
    ])?;
    let selection = RotationSelection::new(vec![
        ArchitectRole::SystemArchitect.agent_name(),
        ArchitectRole::DomainArchitect.agent_name(),
    ])?;
    let marker = config.completion_marker.clone();
    let termination: Box<dyn TerminationStrategy> = if all_confirm {
        Box::new(AllAgentsTermination::new(marker))
    } else {
        Box::new(MarkerTermination::new(marker))
    };
    GroupChat::new(roster, Box::new(selection), termination, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_chat::StopReason;

    const SEED: &str =
        "The design name is 'Payment Processing System' and the OAR Id Tag is 'OAR-12345'.";

    #[tokio::test]
    async fn test_scenario_single_confirmation() {
        let mut chat = build_architect_chat(ChatConfig::default(), false).unwrap();
        let (replies, report) = chat.run_to_completion(SEED).await;

        // Report, introduction, then the system architect confirms.
        assert_eq!(report.reason, StopReason::NormalTermination);
        assert_eq!(report.rounds, 3);
        assert_eq!(replies[0].author.as_str(), "SYSTEM_ARCHITECT");
        assert_eq!(replies[1].author.as_str(), "DOMAIN_ARCHITECT");
        assert_eq!(replies[2].author.as_str(), "SYSTEM_ARCHITECT");
    }

    #[tokio::test]
    async fn test_scenario_all_agents_confirmation() {
        let mut chat = build_architect_chat(ChatConfig::default(), true).unwrap();
        let (replies, report) = chat.run_to_completion(SEED).await;

        // The run keeps going until the domain architect also confirms.
        assert_eq!(report.reason, StopReason::NormalTermination);
        assert_eq!(report.rounds, 4);
        assert_eq!(replies[3].author.as_str(), "DOMAIN_ARCHITECT");
    }
}
