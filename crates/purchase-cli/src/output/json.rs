use super::{OutcomeReport, OutputFormatter};
use crate::error::Result;

pub(crate) struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_reports(&self, reports: &[OutcomeReport<'_>]) -> Result<String> {
        let mut output = serde_json::to_string_pretty(reports)?;
        output.push('\n');
        Ok(output)
    }
}
