use std::marker::PhantomData;

use crate::context::SagaContext;
use crate::error::{StepFailure, UnknownStepError};
use crate::fault::FaultInjected;
use crate::saga::Saga;
use crate::step::SagaStep;

/// Marker type for a builder with no steps.
pub struct Empty;

/// Marker type for a builder with at least one step.
pub struct HasSteps;

/// Type-state builder for constructing sagas.
///
/// Every step must share the same context type, and a saga needs at least
/// one step:
///
/// ```compile_fail
/// use purchase_saga::SagaBuilder;
///
/// struct Ctx;
///
/// // Cannot build an empty saga - `build()` is only available after `first_step()`
/// let saga = SagaBuilder::<Ctx, _>::new().build();
/// ```
pub struct SagaBuilder<Ctx, State> {
    steps: Vec<Box<dyn SagaStep<Context = Ctx>>>,
    _state: PhantomData<State>,
}

impl<Ctx> SagaBuilder<Ctx, Empty> {
    /// Create a new saga builder in the empty state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            _state: PhantomData,
        }
    }

    /// Add the first step to the saga.
    #[must_use]
    pub fn first_step<S>(self, step: S) -> SagaBuilder<Ctx, HasSteps>
    where
        S: SagaStep<Context = Ctx> + 'static,
    {
        let mut steps = self.steps;
        steps.push(Box::new(step));
        SagaBuilder {
            steps,
            _state: PhantomData,
        }
    }
}

impl<Ctx> SagaBuilder<Ctx, Empty> {
    /// Add an already boxed first step.
    #[must_use]
    pub fn first_boxed(self, step: Box<dyn SagaStep<Context = Ctx>>) -> SagaBuilder<Ctx, HasSteps> {
        let mut steps = self.steps;
        steps.push(step);
        SagaBuilder {
            steps,
            _state: PhantomData,
        }
    }
}

impl<Ctx> Default for SagaBuilder<Ctx, Empty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx> SagaBuilder<Ctx, HasSteps> {
    /// Append another step; steps run in the order they are added.
    #[must_use]
    pub fn then<S>(mut self, step: S) -> Self
    where
        S: SagaStep<Context = Ctx> + 'static,
    {
        self.steps.push(Box::new(step));
        self
    }

    /// Append an already boxed step.
    #[must_use]
    pub fn then_boxed(mut self, step: Box<dyn SagaStep<Context = Ctx>>) -> Self {
        self.steps.push(step);
        self
    }

    /// Replace the forward action of the named step with a deliberate failure.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownStepError`] if no registered step has that name.
    pub fn inject_fault<F>(mut self, step_name: &str, fault: F) -> Result<Self, UnknownStepError>
    where
        Ctx: SagaContext + 'static,
        F: Fn(&Ctx) -> StepFailure + Send + Sync + 'static,
    {
        let Some(position) = self.steps.iter().position(|s| s.name() == step_name) else {
            return Err(UnknownStepError {
                step: step_name.to_string(),
                available: self
                    .steps
                    .iter()
                    .map(|s| s.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        };

        let inner = self.steps.remove(position);
        self.steps
            .insert(position, Box::new(FaultInjected::new(inner, fault)));
        Ok(self)
    }

    /// Build the saga from the accumulated steps.
    #[must_use]
    pub fn build(self) -> Saga<Ctx> {
        Saga::from_steps(self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::TransactionStatus;

    #[derive(Default)]
    struct TestContext {
        error: Option<String>,
    }

    impl SagaContext for TestContext {
        fn record_failure(&mut self, failure: &StepFailure) {
            self.error = Some(failure.message().to_string());
        }

        fn failure_message(&self) -> Option<&str> {
            self.error.as_deref()
        }

        fn clear_failure(&mut self) {
            self.error = None;
        }
    }

    struct Named(&'static str);

    impl SagaStep for Named {
        type Context = TestContext;

        fn name(&self) -> &'static str {
            self.0
        }

        fn execute(&self, _ctx: &mut TestContext) -> TransactionStatus {
            TransactionStatus::Success
        }
    }

    #[test]
    fn builder_creates_single_step_saga() {
        let saga = SagaBuilder::new().first_step(Named("only")).build();

        assert_eq!(saga.step_names(), vec!["only"]);
    }

    #[test]
    fn builder_preserves_registration_order() {
        let saga = SagaBuilder::new()
            .first_step(Named("a"))
            .then(Named("b"))
            .then_boxed(Box::new(Named("c")))
            .build();

        assert_eq!(saga.step_names(), vec!["a", "b", "c"]);
        assert_eq!(saga.len(), 3);
    }

    #[test]
    fn inject_fault_keeps_position_and_name() -> anyhow::Result<()> {
        let saga = SagaBuilder::new()
            .first_step(Named("a"))
            .then(Named("b"))
            .then(Named("c"))
            .inject_fault("b", |_: &TestContext| StepFailure::new("nope"))?
            .build();

        assert_eq!(saga.step_names(), vec!["a", "b", "c"]);
        Ok(())
    }

    #[test]
    fn inject_fault_rejects_unknown_step() {
        let result = SagaBuilder::new()
            .first_step(Named("a"))
            .then(Named("b"))
            .inject_fault("missing", |_: &TestContext| StepFailure::new("nope"));

        let err = result.err().expect("unknown step should be rejected");
        assert_eq!(err.step, "missing");
        assert_eq!(err.available, "a, b");
    }
}
