mod formatter;
mod json;
mod plain;
mod report;

pub(crate) use formatter::{OutputFormat, OutputFormatter};
pub(crate) use json::JsonFormatter;
pub(crate) use plain::PlainTextFormatter;
pub(crate) use report::OutcomeReport;
