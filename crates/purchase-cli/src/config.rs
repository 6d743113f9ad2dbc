use std::path::Path;

use purchase_operations::{FaultPlan, INSUFFICIENT_INVENTORY, PurchaseStep};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// A TOML file of `[[scenario]]` tables.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ScenarioFile {
    #[serde(default, rename = "scenario")]
    pub(crate) scenarios: Vec<Scenario>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Scenario {
    pub(crate) name: String,
    pub(crate) user: String,
    pub(crate) product: String,
    pub(crate) quantity: u32,
    #[serde(default)]
    pub(crate) expect: Expectation,
    /// Units on hand for `product`; unlimited when absent.
    pub(crate) stock: Option<u32>,
    pub(crate) fault: Option<FaultConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FaultConfig {
    pub(crate) step: String,
    pub(crate) message: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Expectation {
    #[default]
    Committed,
    RolledBack,
}

impl Expectation {
    #[must_use]
    pub(crate) fn is_met(self, committed: bool) -> bool {
        match self {
            Self::Committed => committed,
            Self::RolledBack => !committed,
        }
    }
}

impl Scenario {
    /// # Errors
    ///
    /// Returns an error if the fault names a step that does not exist.
    pub(crate) fn fault_plan(&self) -> Result<FaultPlan> {
        let Some(fault) = &self.fault else {
            return Ok(FaultPlan::new());
        };
        let step: PurchaseStep = fault.step.parse()?;
        Ok(fault_plan(step, fault.message.as_deref()))
    }
}

/// Build a single-fault plan, falling back to a per-step default message.
#[must_use]
pub(crate) fn fault_plan(step: PurchaseStep, message: Option<&str>) -> FaultPlan {
    let message = match (message, step) {
        (Some(message), _) => message.to_string(),
        (None, PurchaseStep::UpdateInventory) => INSUFFICIENT_INVENTORY.to_string(),
        (None, step) => format!("Simulated {step} failure for product {{product}}"),
    };
    FaultPlan::fail_at(step, message)
}

/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or
/// defines no scenarios.
pub(crate) fn load(path: &Path) -> Result<ScenarioFile> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::ScenarioRead {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ScenarioFile = toml::from_str(&content).map_err(|source| CliError::ScenarioParse {
        path: path.to_path_buf(),
        source,
    })?;
    if file.scenarios.is_empty() {
        return Err(CliError::NoScenarios(path.to_path_buf()));
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[scenario]]
name = "happy path"
user = "user123"
product = "product456"
quantity = 2

[[scenario]]
name = "out of stock"
user = "user789"
product = "outOfStockProduct"
quantity = 100
expect = "rolled-back"
[scenario.fault]
step = "update_inventory"
message = "Insufficient inventory for product {product}"
"#;

    #[test]
    fn parses_scenarios_with_defaults() {
        let file: ScenarioFile = toml::from_str(SAMPLE).expect("valid toml");

        assert_eq!(file.scenarios.len(), 2);
        let happy = &file.scenarios[0];
        assert_eq!(happy.expect, Expectation::Committed);
        assert!(happy.fault.is_none());
        assert!(happy.stock.is_none());
        assert!(happy.fault_plan().expect("no fault").is_empty());
    }

    #[test]
    fn parses_fault_table() {
        let file: ScenarioFile = toml::from_str(SAMPLE).expect("valid toml");

        let failing = &file.scenarios[1];
        assert_eq!(failing.expect, Expectation::RolledBack);
        let plan = failing.fault_plan().expect("known step");
        assert_eq!(plan.faults().len(), 1);
        assert_eq!(plan.faults()[0].step, PurchaseStep::UpdateInventory);
        assert_eq!(plan.faults()[0].message, INSUFFICIENT_INVENTORY);
    }

    #[test]
    fn unknown_fault_step_is_rejected() {
        let file: ScenarioFile = toml::from_str(
            r#"
[[scenario]]
name = "bad"
user = "u"
product = "p"
quantity = 1
[scenario.fault]
step = "teleport"
"#,
        )
        .expect("valid toml");

        let err = file.scenarios[0].fault_plan().expect_err("unknown step");
        assert!(err.to_string().contains("unknown step 'teleport'"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: std::result::Result<ScenarioFile, _> = toml::from_str(
            r#"
[[scenario]]
name = "typo"
user = "u"
product = "p"
quantity = 1
expected = "committed"
"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn default_messages_per_step() {
        let inventory = fault_plan(PurchaseStep::UpdateInventory, None);
        assert_eq!(inventory.faults()[0].message, INSUFFICIENT_INVENTORY);

        let payment = fault_plan(PurchaseStep::ProcessPayment, None);
        assert_eq!(
            payment.faults()[0].message,
            "Simulated process_payment failure for product {product}"
        );

        let custom = fault_plan(PurchaseStep::CreateOrder, Some("no orders today"));
        assert_eq!(custom.faults()[0].message, "no orders today");
    }

    #[test]
    fn expectation_matching() {
        assert!(Expectation::Committed.is_met(true));
        assert!(!Expectation::Committed.is_met(false));
        assert!(Expectation::RolledBack.is_met(false));
        assert!(!Expectation::RolledBack.is_met(true));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load(Path::new("/nonexistent/scenarios.toml")).expect_err("missing file");

        assert!(matches!(err, CliError::ScenarioRead { .. }));
    }
}
