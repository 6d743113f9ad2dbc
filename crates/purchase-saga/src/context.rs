use crate::error::StepFailure;

/// Shared mutable record threaded through every step of one saga run.
///
/// The orchestrator only needs to know where a failing step left its
/// human-readable reason; everything else about the context belongs to the
/// domain.
pub trait SagaContext {
    /// Store the reason a step failed.
    fn record_failure(&mut self, failure: &StepFailure);

    /// The most recently recorded failure message, if any.
    fn failure_message(&self) -> Option<&str>;

    /// Forget any failure left over from an earlier run.
    fn clear_failure(&mut self);
}
