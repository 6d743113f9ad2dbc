use purchase_operations::PurchaseStep;

use super::{OutcomeReport, OutputFormatter};
use crate::config::Expectation;
use crate::error::Result;

pub(crate) struct PlainTextFormatter;

impl PlainTextFormatter {
    fn format_identifier(
        report: &OutcomeReport<'_>,
        value: Option<&str>,
        step: PurchaseStep,
    ) -> String {
        match value {
            Some(id) => id.to_string(),
            None if report.was_compensated(step.name()) => "None (compensated)".to_string(),
            None => "None".to_string(),
        }
    }

    fn format_context(output: &mut String, report: &OutcomeReport<'_>) {
        let ctx = report.context;
        let order = Self::format_identifier(report, ctx.order_id(), PurchaseStep::CreateOrder);
        let payment =
            Self::format_identifier(report, ctx.payment_id(), PurchaseStep::ProcessPayment);
        let shipping =
            Self::format_identifier(report, ctx.shipping_id(), PurchaseStep::ProcessShipping);

        output.push_str(&format!("Order ID: {order}\n"));
        output.push_str(&format!("Payment ID: {payment}\n"));
        output.push_str(&format!("Inventory Updated: {}\n", ctx.inventory_updated()));
        output.push_str(&format!("Shipping ID: {shipping}\n"));
    }

    fn format_report(output: &mut String, report: &OutcomeReport<'_>) {
        output.push_str(&format!("=== {} ===\n", report.title));
        let ctx = report.context;
        output.push_str(&format!(
            "Purchasing {} x {} for {}\n",
            ctx.quantity(),
            ctx.product_id(),
            ctx.user_id()
        ));

        if report.committed {
            output.push_str("Purchase completed successfully!\n");
        } else {
            let error = report.error.unwrap_or("unknown error");
            output.push_str(&format!("Purchase failed: {error}\n"));
            output.push_str("Final state after compensation:\n");
        }
        Self::format_context(output, report);

        output.push_str("\nSteps:\n");
        for line in report.steps.lines() {
            output.push_str(&format!("  {line}\n"));
        }

        if !report.compensation_failures.is_empty() {
            output.push_str("\nCompensation failures:\n");
            for failure in &report.compensation_failures {
                output.push_str(&format!("  {failure}\n"));
            }
        }

        if let (Some(expected), Some(met)) = (report.expected, report.expectation_met) {
            let expected = match expected {
                Expectation::Committed => "committed",
                Expectation::RolledBack => "rolled-back",
            };
            let verdict = if met { "as expected" } else { "UNEXPECTED" };
            let state = report.state;
            output.push_str(&format!("\nExpected {expected}, got {state}: {verdict}\n"));
        }
    }
}

impl OutputFormatter for PlainTextFormatter {
    fn format_reports(&self, reports: &[OutcomeReport<'_>]) -> Result<String> {
        let mut output = String::new();
        for (index, report) in reports.iter().enumerate() {
            if index > 0 {
                output.push('\n');
            }
            Self::format_report(&mut output, report);
        }
        Ok(output)
    }
}
