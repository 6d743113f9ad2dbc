use std::sync::Arc;

use purchase_saga::{SagaStep, StepFailure, TransactionStatus};
use tracing::debug;

use crate::context::PurchaseContext;
use crate::error::ServiceError;
use crate::fault::PurchaseStep;
use crate::traits::{InventoryService, OrderService, PaymentService, ShippingService};

fn forward_failure(action: &str, err: &ServiceError) -> StepFailure {
    StepFailure::new(format!("Failed to {action}: {err}"))
}

fn undo_failure(action: &str, id: &str, err: &ServiceError) -> StepFailure {
    StepFailure::new(format!("failed to {action} {id}: {err}"))
}

pub struct CreateOrderStep {
    orders: Arc<dyn OrderService>,
}

impl CreateOrderStep {
    #[must_use]
    pub fn new(orders: Arc<dyn OrderService>) -> Self {
        Self { orders }
    }
}

impl SagaStep for CreateOrderStep {
    type Context = PurchaseContext;

    fn name(&self) -> &'static str {
        PurchaseStep::CreateOrder.name()
    }

    fn execute(&self, ctx: &mut PurchaseContext) -> TransactionStatus {
        debug!(
            user_id = ctx.user_id(),
            product_id = ctx.product_id(),
            quantity = ctx.quantity(),
            "creating order"
        );
        let result = match self
            .orders
            .create_order(ctx.user_id(), ctx.product_id(), ctx.quantity())
        {
            Ok(order_id) => {
                debug!(%order_id, "order created");
                ctx.order_id = Some(order_id);
                Ok(())
            }
            Err(err) => Err(forward_failure("create order", &err)),
        };
        TransactionStatus::capture(ctx, result)
    }

    fn compensate(&self, ctx: &mut PurchaseContext) -> Result<(), StepFailure> {
        let Some(order_id) = ctx.order_id.take() else {
            return Ok(());
        };
        debug!(%order_id, "cancelling order");
        self.orders
            .cancel_order(&order_id)
            .map_err(|err| undo_failure("cancel order", &order_id, &err))
    }

    fn compensation_description(&self) -> String {
        "cancel the order".to_string()
    }
}

pub struct ProcessPaymentStep {
    payments: Arc<dyn PaymentService>,
}

impl ProcessPaymentStep {
    #[must_use]
    pub fn new(payments: Arc<dyn PaymentService>) -> Self {
        Self { payments }
    }
}

impl SagaStep for ProcessPaymentStep {
    type Context = PurchaseContext;

    fn name(&self) -> &'static str {
        PurchaseStep::ProcessPayment.name()
    }

    fn execute(&self, ctx: &mut PurchaseContext) -> TransactionStatus {
        debug!(order_id = ?ctx.order_id(), "processing payment");
        let charged = match ctx.order_id() {
            Some(order_id) => self.payments.charge(order_id, ctx.user_id()),
            None => Err(ServiceError::MissingOrder { action: "charge" }),
        };
        let result = match charged {
            Ok(payment_id) => {
                debug!(%payment_id, "payment processed");
                ctx.payment_id = Some(payment_id);
                Ok(())
            }
            Err(err) => Err(forward_failure("process payment", &err)),
        };
        TransactionStatus::capture(ctx, result)
    }

    fn compensate(&self, ctx: &mut PurchaseContext) -> Result<(), StepFailure> {
        let Some(payment_id) = ctx.payment_id.take() else {
            return Ok(());
        };
        debug!(%payment_id, "refunding payment");
        self.payments
            .refund(&payment_id)
            .map_err(|err| undo_failure("refund payment", &payment_id, &err))
    }

    fn compensation_description(&self) -> String {
        "refund the payment".to_string()
    }
}

pub struct UpdateInventoryStep {
    inventory: Arc<dyn InventoryService>,
}

impl UpdateInventoryStep {
    #[must_use]
    pub fn new(inventory: Arc<dyn InventoryService>) -> Self {
        Self { inventory }
    }
}

impl SagaStep for UpdateInventoryStep {
    type Context = PurchaseContext;

    fn name(&self) -> &'static str {
        PurchaseStep::UpdateInventory.name()
    }

    fn execute(&self, ctx: &mut PurchaseContext) -> TransactionStatus {
        debug!(
            product_id = ctx.product_id(),
            quantity = ctx.quantity(),
            "updating inventory"
        );
        let result = match self.inventory.reserve(ctx.product_id(), ctx.quantity()) {
            Ok(()) => {
                ctx.inventory_updated = true;
                Ok(())
            }
            Err(err) => Err(forward_failure("update inventory", &err)),
        };
        TransactionStatus::capture(ctx, result)
    }

    fn compensate(&self, ctx: &mut PurchaseContext) -> Result<(), StepFailure> {
        if !ctx.inventory_updated {
            return Ok(());
        }
        ctx.inventory_updated = false;
        debug!(
            product_id = ctx.product_id(),
            quantity = ctx.quantity(),
            "restoring inventory"
        );
        self.inventory
            .restore(ctx.product_id(), ctx.quantity())
            .map_err(|err| undo_failure("restore inventory for", ctx.product_id(), &err))
    }

    fn compensation_description(&self) -> String {
        "restore the reserved stock".to_string()
    }
}

pub struct ProcessShippingStep {
    shipping: Arc<dyn ShippingService>,
}

impl ProcessShippingStep {
    #[must_use]
    pub fn new(shipping: Arc<dyn ShippingService>) -> Self {
        Self { shipping }
    }
}

impl SagaStep for ProcessShippingStep {
    type Context = PurchaseContext;

    fn name(&self) -> &'static str {
        PurchaseStep::ProcessShipping.name()
    }

    fn execute(&self, ctx: &mut PurchaseContext) -> TransactionStatus {
        debug!(order_id = ?ctx.order_id(), "processing shipping");
        let scheduled = match ctx.order_id() {
            Some(order_id) => self.shipping.schedule(order_id, ctx.user_id()),
            None => Err(ServiceError::MissingOrder { action: "ship" }),
        };
        let result = match scheduled {
            Ok(shipping_id) => {
                debug!(%shipping_id, "shipping processed");
                ctx.shipping_id = Some(shipping_id);
                Ok(())
            }
            Err(err) => Err(forward_failure("process shipping", &err)),
        };
        TransactionStatus::capture(ctx, result)
    }

    fn compensate(&self, ctx: &mut PurchaseContext) -> Result<(), StepFailure> {
        let Some(shipping_id) = ctx.shipping_id.take() else {
            return Ok(());
        };
        debug!(%shipping_id, "cancelling shipment");
        self.shipping
            .cancel(&shipping_id)
            .map_err(|err| undo_failure("cancel shipment", &shipping_id, &err))
    }

    fn compensation_description(&self) -> String {
        "cancel the shipment".to_string()
    }
}
