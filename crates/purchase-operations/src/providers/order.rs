use std::sync::Arc;

use tracing::debug;

use super::ledger::Ledger;
use crate::error::ServiceError;
use crate::ids::{IdGenerator, ORDER_PREFIX};
use crate::traits::OrderService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub user_id: String,
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug)]
pub struct InMemoryOrderService {
    ids: Arc<IdGenerator>,
    orders: Ledger<OrderRecord>,
    fail_create: Option<String>,
    fail_cancel: Option<String>,
}

impl InMemoryOrderService {
    #[must_use]
    pub fn new(ids: Arc<IdGenerator>) -> Self {
        Self {
            ids,
            orders: Ledger::new("order"),
            fail_create: None,
            fail_cancel: None,
        }
    }

    /// Make every `create_order` call fail with `reason`.
    #[must_use]
    pub fn failing_create(mut self, reason: impl Into<String>) -> Self {
        self.fail_create = Some(reason.into());
        self
    }

    /// Make every `cancel_order` call fail with `reason`.
    #[must_use]
    pub fn failing_cancel(mut self, reason: impl Into<String>) -> Self {
        self.fail_cancel = Some(reason.into());
        self
    }

    /// Identifiers of orders that exist and have not been cancelled.
    #[must_use]
    pub fn open_orders(&self) -> Vec<String> {
        self.orders.ids()
    }

    #[must_use]
    pub fn order(&self, order_id: &str) -> Option<OrderRecord> {
        self.orders.get(order_id)
    }
}

impl OrderService for InMemoryOrderService {
    fn create_order(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: u32,
    ) -> Result<String, ServiceError> {
        if let Some(reason) = &self.fail_create {
            return Err(ServiceError::Rejected(reason.clone()));
        }

        let order_id = self.ids.next_id(ORDER_PREFIX);
        self.orders.insert(
            &order_id,
            OrderRecord {
                user_id: user_id.to_string(),
                product_id: product_id.to_string(),
                quantity,
            },
        )?;
        debug!(%order_id, user_id, product_id, quantity, "order stored");
        Ok(order_id)
    }

    fn cancel_order(&self, order_id: &str) -> Result<(), ServiceError> {
        if let Some(reason) = &self.fail_cancel {
            return Err(ServiceError::Rejected(reason.clone()));
        }

        self.orders.remove(order_id)?;
        debug!(order_id, "order removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_order_is_open_until_cancelled() -> anyhow::Result<()> {
        let service = InMemoryOrderService::new(Arc::new(IdGenerator::new()));

        let order_id = service.create_order("u", "p", 2)?;

        assert!(order_id.starts_with("ORD-"));
        assert_eq!(service.open_orders(), vec![order_id.clone()]);
        assert_eq!(
            service.order(&order_id),
            Some(OrderRecord {
                user_id: "u".to_string(),
                product_id: "p".to_string(),
                quantity: 2,
            })
        );

        service.cancel_order(&order_id)?;

        assert!(service.open_orders().is_empty());
        Ok(())
    }

    #[test]
    fn failing_create_rejects_without_storing() {
        let service =
            InMemoryOrderService::new(Arc::new(IdGenerator::new())).failing_create("db down");

        let err = service.create_order("u", "p", 1).expect_err("should fail");

        assert_eq!(err, ServiceError::Rejected("db down".to_string()));
        assert!(service.open_orders().is_empty());
    }

    #[test]
    fn failing_cancel_keeps_order_open() -> anyhow::Result<()> {
        let service =
            InMemoryOrderService::new(Arc::new(IdGenerator::new())).failing_cancel("locked");
        let order_id = service.create_order("u", "p", 1)?;

        assert!(service.cancel_order(&order_id).is_err());
        assert_eq!(service.open_orders(), vec![order_id]);
        Ok(())
    }
}
