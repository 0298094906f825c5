//! Simulated tools for the architect review scenario.
//!
//! These stand in for the enterprise lookups and notifications the real
//! agents would call. The orchestration engine never sees them; only the
//! system architect agent dispatches them while composing its report.

use parley_core::{ExecutionResult, Tool};

/// Looks up the solution design link for a design name.
pub struct SolutionDesignTool;

impl Tool for SolutionDesignTool {
    fn name(&self) -> &str {
        "solution_design"
    }

    fn description(&self) -> &str {
        "Retrieves the link of a solution design from the Enterprise Architecture repository"
    }

    fn call(&self, input: String) -> ExecutionResult {
        if input.trim().is_empty() {
            return ExecutionResult::failure("design name must not be empty");
        }
        let link = format!("https://ea-repository.example.com/designs/{input}");
        ExecutionResult::success(format!(
            "Solution design for {input} can be found at the following link: {link}"
        ))
    }
}

/// Lists the resource types provisioned under an OAR id tag.
pub struct ResourceTypesTool;

const RESOURCE_TYPES: [&str; 3] = [
    "Microsoft.Compute/virtualMachines",
    "Microsoft.Storage/storageAccounts",
    "Microsoft.Network/virtualNetworks",
];

impl Tool for ResourceTypesTool {
    fn name(&self) -> &str {
        "resource_types"
    }

    fn description(&self) -> &str {
        "Retrieves resource types for the subscription matching an OAR Id Tag"
    }

    fn call(&self, input: String) -> ExecutionResult {
        if input.trim().is_empty() {
            return ExecutionResult::failure("OAR id must not be empty");
        }
        let mut lines = vec![format!(
            "Found subscription for OAR Id {input} with the following resource types:"
        )];
        lines.extend(RESOURCE_TYPES.iter().map(|t| format!("- {t}")));
        ExecutionResult::success(lines.join("\n"))
    }
}

/// Composes the notification message to the domain architect.
pub struct NotificationTool;

impl Tool for NotificationTool {
    fn name(&self) -> &str {
        "notify_architect"
    }

    fn description(&self) -> &str {
        "Generates the notification message to the Domain Architect"
    }

    fn call(&self, input: String) -> ExecutionResult {
        ExecutionResult::success(format!(
            "Dear Domain Architect,\n\n{input}\n\nBest regards,\nSystem Architect"
        ))
    }
}
