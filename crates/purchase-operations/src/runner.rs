use purchase_saga::{Saga, SagaAuditLog, SagaError, SagaState};

use crate::context::PurchaseContext;
use crate::error::PurchaseError;

/// Everything a caller can inspect after one purchase attempt.
#[derive(Debug)]
pub struct PurchaseOutcome {
    pub context: PurchaseContext,
    pub failure: Option<SagaError>,
    pub audit_log: SagaAuditLog,
}

impl PurchaseOutcome {
    #[must_use]
    pub fn committed(&self) -> bool {
        self.failure.is_none()
    }

    #[must_use]
    pub fn final_state(&self) -> SagaState {
        self.audit_log.final_state()
    }
}

/// Run one purchase to completion, keeping the context and audit log.
#[must_use]
pub fn run_purchase(saga: &Saga<PurchaseContext>, mut context: PurchaseContext) -> PurchaseOutcome {
    let (result, audit_log) = saga.run_with_audit(&mut context);
    PurchaseOutcome {
        context,
        failure: result.err(),
        audit_log,
    }
}

/// Run independent purchases in parallel, one thread per context.
///
/// Steps within each purchase still run strictly in order. Outcomes are
/// returned in the order of `contexts`.
///
/// # Errors
///
/// Returns [`PurchaseError::WorkerSpawn`] if the OS refuses another thread,
/// and [`PurchaseError::WorkerPanicked`] if a step panicked. Threads already
/// started are joined before either is returned.
pub fn run_concurrently(
    saga: &Saga<PurchaseContext>,
    contexts: Vec<PurchaseContext>,
) -> Result<Vec<PurchaseOutcome>, PurchaseError> {
    std::thread::scope(|scope| {
        let handles = contexts
            .into_iter()
            .enumerate()
            .map(|(index, context)| {
                std::thread::Builder::new()
                    .name(format!("purchase-{index}"))
                    .spawn_scoped(scope, move || run_purchase(saga, context))
                    .map_err(PurchaseError::WorkerSpawn)
            })
            .collect::<Result<Vec<_>, _>>()?;

        handles
            .into_iter()
            .map(|handle| handle.join().map_err(|_| PurchaseError::WorkerPanicked))
            .collect()
    })
}
