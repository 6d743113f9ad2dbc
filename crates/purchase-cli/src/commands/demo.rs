use purchase_operations::{
    FaultPlan, PurchaseContext, PurchaseServices, purchase_saga, purchase_saga_with_faults,
    run_purchase,
};

use super::{Settings, check_expectations, emit};
use crate::config::Expectation;
use crate::error::Result;
use crate::output::OutcomeReport;

pub(crate) fn run(settings: &Settings) -> Result<()> {
    let services = PurchaseServices::in_memory();

    let success = run_purchase(
        &purchase_saga(&services),
        PurchaseContext::new("user123", "product456", 2)?,
    );

    let out_of_stock = purchase_saga_with_faults(&services, &FaultPlan::out_of_stock())?;
    let failure = run_purchase(
        &out_of_stock,
        PurchaseContext::new("user789", "outOfStockProduct", 100)?,
    );

    let reports = [
        OutcomeReport::new("Success Scenario", &success).expecting(Expectation::Committed),
        OutcomeReport::new("Failure Scenario", &failure).expecting(Expectation::RolledBack),
    ];

    emit(settings, &reports)?;
    check_expectations(&reports)
}
