use purchase_operations::{PurchaseContext, PurchaseOutcome};
use purchase_saga::SagaError;
use serde::Serialize;

use crate::config::Expectation;

/// What gets printed for one purchase attempt.
#[derive(Debug, Serialize)]
pub(crate) struct OutcomeReport<'a> {
    pub(crate) title: &'a str,
    pub(crate) committed: bool,
    pub(crate) state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) expected: Option<Expectation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) expectation_met: Option<bool>,
    pub(crate) failed_step: Option<&'a str>,
    pub(crate) error: Option<&'a str>,
    pub(crate) compensated: Vec<&'a str>,
    pub(crate) compensation_failures: Vec<String>,
    pub(crate) context: &'a PurchaseContext,
    #[serde(skip)]
    pub(crate) steps: String,
}

impl<'a> OutcomeReport<'a> {
    pub(crate) fn new(title: &'a str, outcome: &'a PurchaseOutcome) -> Self {
        let compensation_failures = match &outcome.failure {
            Some(SagaError::CompensationFailed {
                compensation_failures,
                ..
            }) => compensation_failures
                .iter()
                .map(|failure| format!("{failure}: {}", failure.source))
                .collect(),
            _ => Vec::new(),
        };

        Self {
            title,
            committed: outcome.committed(),
            state: outcome.final_state().as_str(),
            expected: None,
            expectation_met: None,
            failed_step: outcome.failure.as_ref().map(SagaError::failed_step),
            error: outcome.context.error(),
            compensated: outcome.audit_log.compensation_order(),
            compensation_failures,
            context: &outcome.context,
            steps: outcome.audit_log.summary(),
        }
    }

    #[must_use]
    pub(crate) fn expecting(mut self, expected: Expectation) -> Self {
        self.expected = Some(expected);
        self.expectation_met = Some(expected.is_met(self.committed));
        self
    }

    /// Without an explicit expectation the purchase is expected to commit.
    pub(crate) fn as_expected(&self) -> bool {
        self.expectation_met.unwrap_or(self.committed)
    }

    pub(crate) fn was_compensated(&self, step: &str) -> bool {
        self.compensated.contains(&step)
    }
}
