use std::path::Path;

use purchase_operations::{PurchaseContext, purchase_saga_with_faults, run_purchase};
use tracing::debug;

use super::{Settings, check_expectations, emit, in_memory_services};
use crate::config;
use crate::error::Result;
use crate::output::OutcomeReport;

/// Each scenario gets fresh services so stock and ids never leak between them.
pub(crate) fn run(path: &Path, settings: &Settings) -> Result<()> {
    let file = config::load(path)?;

    let mut outcomes = Vec::with_capacity(file.scenarios.len());
    for scenario in &file.scenarios {
        debug!(scenario = %scenario.name, "running scenario");
        let services = in_memory_services(&scenario.product, scenario.stock);
        let saga = purchase_saga_with_faults(&services, &scenario.fault_plan()?)?;
        let context = PurchaseContext::new(
            scenario.user.as_str(),
            scenario.product.as_str(),
            scenario.quantity,
        )?;
        outcomes.push(run_purchase(&saga, context));
    }

    let reports: Vec<_> = file
        .scenarios
        .iter()
        .zip(&outcomes)
        .map(|(scenario, outcome)| {
            OutcomeReport::new(&scenario.name, outcome).expecting(scenario.expect)
        })
        .collect();

    emit(settings, &reports)?;
    check_expectations(&reports)
}
