mod demo;
mod run;
mod scenarios;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Subcommand;
use purchase_operations::PurchaseServices;
use purchase_operations::providers::InMemoryInventoryService;

use crate::error::{CliError, Result};
use crate::output::{OutcomeReport, OutputFormat};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the success and out-of-stock demonstration purchases
    Demo,
    /// Run a single purchase, optionally failing a step on purpose
    Run(run::RunArgs),
    /// Run every scenario in a TOML file and check its expected outcome
    Scenarios {
        /// Path to the scenario file
        path: PathBuf,
    },
}

pub(crate) struct Settings {
    pub(crate) format: OutputFormat,
    pub(crate) quiet: bool,
}

impl Commands {
    pub(crate) fn execute(self, settings: &Settings) -> Result<()> {
        match self {
            Self::Demo => demo::run(settings),
            Self::Run(args) => run::run(&args, settings),
            Self::Scenarios { path } => scenarios::run(&path, settings),
        }
    }
}

/// In-memory services, optionally limiting stock for one product.
fn in_memory_services(product: &str, stock: Option<u32>) -> PurchaseServices {
    let services = PurchaseServices::in_memory();
    match stock {
        Some(quantity) => PurchaseServices {
            inventory: Arc::new(InMemoryInventoryService::new().with_stock(product, quantity)),
            ..services
        },
        None => services,
    }
}

fn emit(settings: &Settings, reports: &[OutcomeReport<'_>]) -> Result<()> {
    if settings.quiet {
        return Ok(());
    }
    let output = settings.format.formatter().format_reports(reports)?;
    print!("{output}");
    Ok(())
}

fn check_expectations(reports: &[OutcomeReport<'_>]) -> Result<()> {
    let failed = reports.iter().filter(|report| !report.as_expected()).count();
    if failed > 0 {
        return Err(CliError::UnexpectedOutcomes {
            failed,
            total: reports.len(),
        });
    }
    Ok(())
}
