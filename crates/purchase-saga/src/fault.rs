use tracing::debug;

use crate::context::SagaContext;
use crate::error::StepFailure;
use crate::status::TransactionStatus;
use crate::step::SagaStep;

/// Produces the failure an injected fault reports, given the run's context.
pub type Fault<C> = Box<dyn Fn(&C) -> StepFailure + Send + Sync>;

/// A step whose forward action is replaced by a deliberate failure.
///
/// The wrapped step is never executed, so nothing is committed and the
/// saga compensates only the steps before it. Name and compensation
/// description are those of the wrapped step.
pub struct FaultInjected<C> {
    inner: Box<dyn SagaStep<Context = C>>,
    fault: Fault<C>,
}

impl<C> FaultInjected<C> {
    pub fn new<F>(inner: Box<dyn SagaStep<Context = C>>, fault: F) -> Self
    where
        F: Fn(&C) -> StepFailure + Send + Sync + 'static,
    {
        Self {
            inner,
            fault: Box::new(fault),
        }
    }
}

impl<C: SagaContext> SagaStep for FaultInjected<C> {
    type Context = C;

    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn execute(&self, ctx: &mut C) -> TransactionStatus {
        let failure = (self.fault)(ctx);
        debug!(step = self.inner.name(), %failure, "injected fault");
        TransactionStatus::capture(ctx, Err(failure))
    }

    fn compensate(&self, ctx: &mut C) -> Result<(), StepFailure> {
        self.inner.compensate(ctx)
    }

    fn compensation_description(&self) -> String {
        self.inner.compensation_description()
    }
}
