use clap::ValueEnum;

use super::{JsonFormatter, OutcomeReport, PlainTextFormatter};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable narration
    Plain,
    /// Machine-readable JSON array of outcomes
    Json,
}

impl OutputFormat {
    pub(crate) fn formatter(self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Plain => Box::new(PlainTextFormatter),
            Self::Json => Box::new(JsonFormatter),
        }
    }
}

pub(crate) trait OutputFormatter {
    fn format_reports(&self, reports: &[OutcomeReport<'_>]) -> Result<String>;
}
