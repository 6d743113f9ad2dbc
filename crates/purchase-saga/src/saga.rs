use tracing::{debug, info, warn};

use crate::audit::SagaAuditLog;
use crate::context::SagaContext;
use crate::error::{CompensationFailure, SagaError};
use crate::state::SagaState;
use crate::status::TransactionStatus;
use crate::step::SagaStep;

/// A compiled saga ready for execution.
///
/// The saga holds nothing but its ordered steps, so one instance can run any
/// number of independent purchases, including concurrently on distinct
/// contexts. Each call to [`Saga::execute`] is a fresh run.
pub struct Saga<Ctx> {
    steps: Vec<Box<dyn SagaStep<Context = Ctx>>>,
}

impl<Ctx> Saga<Ctx> {
    pub(crate) fn from_steps(steps: Vec<Box<dyn SagaStep<Context = Ctx>>>) -> Self {
        Self { steps }
    }

    /// Number of registered steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false: the builder refuses to build a saga without steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step names in execution order.
    #[must_use]
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }
}

impl<Ctx: SagaContext> Saga<Ctx> {
    /// Execute the saga against `ctx`, returning whether every step committed.
    ///
    /// On failure, every step that had succeeded is compensated in reverse
    /// order before this returns, and the context carries the failure message.
    /// A failure recorded by an earlier run on the same context is cleared
    /// when the run starts.
    pub fn execute(&self, ctx: &mut Ctx) -> bool {
        self.run(ctx).is_ok()
    }

    /// Execute the saga, reporting which step failed.
    ///
    /// # Errors
    ///
    /// Returns `SagaError::StepFailed` if a step fails and all compensations succeed.
    /// Returns `SagaError::CompensationFailed` if a step fails and some compensations also fail.
    pub fn run(&self, ctx: &mut Ctx) -> Result<(), SagaError> {
        let (result, _audit_log) = self.run_with_audit(ctx);
        result
    }

    /// Execute the saga and return both the result and an audit log.
    ///
    /// The audit log tracks all step executions, compensations and state
    /// transitions of this run.
    pub fn run_with_audit(&self, ctx: &mut Ctx) -> (Result<(), SagaError>, SagaAuditLog) {
        let mut audit_log = SagaAuditLog::new();
        let mut executed: Vec<usize> = Vec::with_capacity(self.steps.len());

        audit_log.transition_to(SagaState::Running);
        ctx.clear_failure();

        for (index, step) in self.steps.iter().enumerate() {
            let record = audit_log.record_start(step.name());
            debug!(step = step.name(), position = index + 1, "executing saga step");

            match step.execute(ctx) {
                TransactionStatus::Success => {
                    audit_log.record_success(record, step.compensation_description());
                    executed.push(index);
                }
                TransactionStatus::Failed => {
                    audit_log.record_failure(record);
                    let message = ctx.failure_message().map_or_else(
                        || format!("step '{}' reported failure", step.name()),
                        str::to_string,
                    );
                    warn!(step = step.name(), %message, "saga step failed");

                    audit_log.transition_to(SagaState::Compensating);
                    let compensation_failures = self.compensate(ctx, &mut audit_log, executed);
                    audit_log.transition_to(SagaState::RolledBack);
                    info!(
                        failed_step = step.name(),
                        compensation_failures = compensation_failures.len(),
                        "saga rolled back"
                    );

                    let error = if compensation_failures.is_empty() {
                        SagaError::StepFailed {
                            step: step.name().to_string(),
                            message,
                        }
                    } else {
                        SagaError::CompensationFailed {
                            failed_step: step.name().to_string(),
                            message,
                            compensation_failures,
                        }
                    };
                    return (Err(error), audit_log);
                }
            }
        }

        audit_log.transition_to(SagaState::Committed);
        info!(steps = self.steps.len(), "saga committed");
        (Ok(()), audit_log)
    }

    fn compensate(
        &self,
        ctx: &mut Ctx,
        audit_log: &mut SagaAuditLog,
        mut executed: Vec<usize>,
    ) -> Vec<CompensationFailure> {
        let mut failures = Vec::new();

        while let Some(index) = executed.pop() {
            let step = &self.steps[index];
            let description = step.compensation_description();
            debug!(step = step.name(), %description, "compensating saga step");

            match step.compensate(ctx) {
                Ok(()) => audit_log.record_compensated(index),
                Err(source) => {
                    warn!(step = step.name(), error = %source, "compensation failed, continuing");
                    audit_log.record_compensation_failed(index);
                    failures.push(CompensationFailure {
                        step: step.name().to_string(),
                        description,
                        source,
                    });
                }
            }
        }

        failures
    }
}
