use crate::error::StepFailure;
use crate::status::TransactionStatus;

/// A step in a saga that can be executed and compensated.
///
/// Every step of a saga works on the same `Context`. A step that succeeds
/// leaves its result on the context; a step that fails records why on the
/// context and returns [`TransactionStatus::Failed`].
pub trait SagaStep: Send + Sync {
    /// Shared record all steps of the saga read and write.
    type Context;

    /// Human-readable name for logging and error messages.
    fn name(&self) -> &'static str;

    /// Perform the forward action.
    ///
    /// Must not panic; failures are reported through the returned status and
    /// a message recorded on the context.
    fn execute(&self, ctx: &mut Self::Context) -> TransactionStatus;

    /// Compensate (undo) the step's effects.
    ///
    /// Called during rollback when a later step fails, only for steps whose
    /// `execute` returned [`TransactionStatus::Success`]. Implementations
    /// must leave the context fields they own cleared even when the
    /// underlying undo fails.
    ///
    /// The default implementation is a no-op, suitable for read-only steps.
    ///
    /// # Errors
    ///
    /// Returns an error if the undo could not be carried out.
    fn compensate(&self, ctx: &mut Self::Context) -> Result<(), StepFailure> {
        let _ = ctx;
        Ok(())
    }

    /// Human-readable description of what compensation will do.
    fn compensation_description(&self) -> String {
        format!("undo {}", self.name())
    }
}
