use std::sync::Arc;

use purchase_saga::{HasSteps, Saga, SagaBuilder, StepFailure};

use crate::context::PurchaseContext;
use crate::error::PurchaseError;
use crate::fault::{FaultPlan, render_message};
use crate::ids::IdGenerator;
use crate::providers::{
    InMemoryInventoryService, InMemoryOrderService, InMemoryPaymentService,
    InMemoryShippingService,
};
use crate::steps::{CreateOrderStep, ProcessPaymentStep, ProcessShippingStep, UpdateInventoryStep};
use crate::traits::{InventoryService, OrderService, PaymentService, ShippingService};

/// The collaborators the four purchase steps call.
#[derive(Clone)]
pub struct PurchaseServices {
    pub orders: Arc<dyn OrderService>,
    pub payments: Arc<dyn PaymentService>,
    pub inventory: Arc<dyn InventoryService>,
    pub shipping: Arc<dyn ShippingService>,
}

impl PurchaseServices {
    /// In-memory services sharing one identifier generator, with unlimited stock.
    #[must_use]
    pub fn in_memory() -> Self {
        let ids = Arc::new(IdGenerator::new());
        Self {
            orders: Arc::new(InMemoryOrderService::new(Arc::clone(&ids))),
            payments: Arc::new(InMemoryPaymentService::new(Arc::clone(&ids))),
            inventory: Arc::new(InMemoryInventoryService::new()),
            shipping: Arc::new(InMemoryShippingService::new(ids)),
        }
    }
}

fn purchase_steps(services: &PurchaseServices) -> SagaBuilder<PurchaseContext, HasSteps> {
    SagaBuilder::new()
        .first_step(CreateOrderStep::new(Arc::clone(&services.orders)))
        .then(ProcessPaymentStep::new(Arc::clone(&services.payments)))
        .then(UpdateInventoryStep::new(Arc::clone(&services.inventory)))
        .then(ProcessShippingStep::new(Arc::clone(&services.shipping)))
}

/// Build the purchase saga: create order, process payment, update
/// inventory, process shipping.
#[must_use]
pub fn purchase_saga(services: &PurchaseServices) -> Saga<PurchaseContext> {
    purchase_steps(services).build()
}

/// Build the purchase saga with the planned steps failing on purpose.
///
/// # Errors
///
/// Returns [`PurchaseError::UnknownStep`] if the plan names a step the saga
/// does not have.
pub fn purchase_saga_with_faults(
    services: &PurchaseServices,
    plan: &FaultPlan,
) -> Result<Saga<PurchaseContext>, PurchaseError> {
    let mut builder = purchase_steps(services);
    for fault in plan.faults() {
        let template = fault.message.clone();
        builder = builder.inject_fault(fault.step.name(), move |ctx: &PurchaseContext| {
            StepFailure::new(render_message(&template, ctx))
        })?;
    }
    Ok(builder.build())
}
