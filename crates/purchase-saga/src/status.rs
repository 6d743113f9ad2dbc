use std::fmt;

use crate::context::SagaContext;
use crate::error::StepFailure;

/// Outcome of a single step's forward action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    Success,
    Failed,
}

impl TransactionStatus {
    /// Convert a fallible step body into a status.
    ///
    /// On error the failure is recorded on the context, so the failure never
    /// leaves the step as anything other than [`TransactionStatus::Failed`].
    pub fn capture<C: SagaContext>(ctx: &mut C, result: Result<(), StepFailure>) -> Self {
        match result {
            Ok(()) => Self::Success,
            Err(failure) => {
                ctx.record_failure(&failure);
                Self::Failed
            }
        }
    }

    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("SUCCESS"),
            Self::Failed => f.write_str("FAILED"),
        }
    }
}
