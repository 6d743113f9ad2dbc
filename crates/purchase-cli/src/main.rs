mod commands;
mod config;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use clap::{ArgAction, Parser};

use crate::commands::Commands;
use crate::error::CliError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "purchase-saga")]
#[command(bin_name = "purchase-saga")]
#[command(about = "Run product purchases through a compensating saga", long_about = None)]
struct Cli {
    /// Output format for purchase results
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain, global = true)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print nothing but errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let settings = commands::Settings {
        format: cli.format,
        quiet: cli.quiet,
    };

    if let Err(e) = cli.command.execute(&settings) {
        print_error(&e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}
