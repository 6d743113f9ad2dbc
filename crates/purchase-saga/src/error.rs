use thiserror::Error;

/// Failure reported by a step's forward action or its compensation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StepFailure {
    message: String,
}

impl StepFailure {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error from a failed compensation operation.
#[derive(Debug, Error)]
#[error("compensation failed for step '{step}': {description}")]
pub struct CompensationFailure {
    /// Name of the step whose compensation failed.
    pub step: String,
    /// Description of what the compensation was trying to do.
    pub description: String,
    /// The underlying failure.
    #[source]
    pub source: StepFailure,
}

/// Error from saga execution.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SagaError {
    /// A step failed and every committed step was compensated.
    #[error("step '{step}' failed: {message}")]
    StepFailed {
        /// Name of the step that failed.
        step: String,
        /// Failure message recorded on the context.
        message: String,
    },

    /// A step failed and some compensations also failed.
    #[error(
        "step '{failed_step}' failed: {message}, and {} compensation(s) also failed",
        compensation_failures.len()
    )]
    CompensationFailed {
        /// Name of the step that originally failed.
        failed_step: String,
        /// Failure message recorded on the context.
        message: String,
        /// Failures collected while compensating, in compensation order.
        compensation_failures: Vec<CompensationFailure>,
    },
}

impl SagaError {
    /// Name of the step whose forward action failed.
    #[must_use]
    pub fn failed_step(&self) -> &str {
        match self {
            Self::StepFailed { step, .. } => step,
            Self::CompensationFailed { failed_step, .. } => failed_step,
        }
    }

    /// The human-readable reason the run failed.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::StepFailed { message, .. } | Self::CompensationFailed { message, .. } => {
                message
            }
        }
    }
}

/// A step name passed to the builder did not match any registered step.
#[derive(Debug, Error)]
#[error("unknown step '{step}' (available: {available})")]
pub struct UnknownStepError {
    pub step: String,
    pub available: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_failed_display_includes_step_and_message() {
        let err = SagaError::StepFailed {
            step: "reserve".to_string(),
            message: "out of stock".to_string(),
        };

        assert_eq!(err.to_string(), "step 'reserve' failed: out of stock");
    }

    #[test]
    fn compensation_failed_display_counts_failures() {
        let err = SagaError::CompensationFailed {
            failed_step: "ship".to_string(),
            message: "no courier".to_string(),
            compensation_failures: vec![CompensationFailure {
                step: "charge".to_string(),
                description: "refund".to_string(),
                source: StepFailure::new("gateway down"),
            }],
        };

        let msg = err.to_string();

        assert!(msg.contains("'ship'"));
        assert!(msg.contains("1 compensation(s)"));
    }

    #[test]
    fn accessors_work_for_both_variants() {
        let failed = SagaError::StepFailed {
            step: "a".to_string(),
            message: "m1".to_string(),
        };
        let comp = SagaError::CompensationFailed {
            failed_step: "b".to_string(),
            message: "m2".to_string(),
            compensation_failures: Vec::new(),
        };

        assert_eq!(failed.failed_step(), "a");
        assert_eq!(failed.message(), "m1");
        assert_eq!(comp.failed_step(), "b");
        assert_eq!(comp.message(), "m2");
    }

    #[test]
    fn compensation_failure_exposes_source() {
        let failure = CompensationFailure {
            step: "charge".to_string(),
            description: "refund payment".to_string(),
            source: StepFailure::new("gateway down"),
        };

        let source = std::error::Error::source(&failure).map(ToString::to_string);

        assert_eq!(source.as_deref(), Some("gateway down"));
    }
}
