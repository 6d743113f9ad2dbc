use clap::Args;
use purchase_operations::{
    FaultPlan, PurchaseContext, PurchaseStep, purchase_saga_with_faults, run_concurrently,
};
use tracing::info;

use super::{Settings, emit, in_memory_services};
use crate::config::fault_plan;
use crate::error::{CliError, Result};
use crate::output::OutcomeReport;

/// One worker thread is spawned per purchase.
const MAX_CONCURRENT_PURCHASES: i64 = 1024;

#[derive(Args)]
pub(crate) struct RunArgs {
    /// User placing the order
    #[arg(long)]
    user: String,

    /// Product being bought
    #[arg(long)]
    product: String,

    /// Number of units
    #[arg(long, default_value_t = 1)]
    quantity: u32,

    /// Make this step fail (create_order, process_payment, update_inventory, process_shipping)
    #[arg(long, value_name = "STEP")]
    fail_at: Option<PurchaseStep>,

    /// Failure message for --fail-at; {user}, {product} and {quantity} are filled in
    #[arg(long, requires = "fail_at")]
    message: Option<String>,

    /// Units of the product in stock (unlimited by default)
    #[arg(long)]
    stock: Option<u32>,

    /// Run this many identical purchases concurrently against the same services (at most 1024)
    #[arg(
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..=MAX_CONCURRENT_PURCHASES)
    )]
    count: u32,
}

pub(crate) fn run(args: &RunArgs, settings: &Settings) -> Result<()> {
    let services = in_memory_services(&args.product, args.stock);
    let plan = args.fail_at.map_or_else(FaultPlan::new, |step| {
        fault_plan(step, args.message.as_deref())
    });
    let saga = purchase_saga_with_faults(&services, &plan)?;

    let contexts = (0..args.count)
        .map(|_| PurchaseContext::new(args.user.as_str(), args.product.as_str(), args.quantity))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    info!(count = contexts.len(), product = %args.product, "running purchases");
    let outcomes = run_concurrently(&saga, contexts)?;

    let titles: Vec<String> = if outcomes.len() == 1 {
        vec!["Purchase".to_string()]
    } else {
        (1..=outcomes.len())
            .map(|n| format!("Purchase {n}"))
            .collect()
    };
    let reports: Vec<_> = titles
        .iter()
        .zip(&outcomes)
        .map(|(title, outcome)| OutcomeReport::new(title, outcome))
        .collect();
    emit(settings, &reports)?;

    match outcomes.into_iter().find_map(|outcome| outcome.failure) {
        Some(failure) => Err(CliError::RolledBack(failure)),
        None => Ok(()),
    }
}
