use std::sync::Arc;

use tracing::debug;

use super::ledger::Ledger;
use crate::error::ServiceError;
use crate::ids::{IdGenerator, SHIPPING_PREFIX};
use crate::traits::ShippingService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentRecord {
    pub order_id: String,
    pub user_id: String,
}

#[derive(Debug)]
pub struct InMemoryShippingService {
    ids: Arc<IdGenerator>,
    shipments: Ledger<ShipmentRecord>,
    fail_schedule: Option<String>,
    fail_cancel: Option<String>,
}

impl InMemoryShippingService {
    #[must_use]
    pub fn new(ids: Arc<IdGenerator>) -> Self {
        Self {
            ids,
            shipments: Ledger::new("shipment"),
            fail_schedule: None,
            fail_cancel: None,
        }
    }

    #[must_use]
    pub fn failing_schedule(mut self, reason: impl Into<String>) -> Self {
        self.fail_schedule = Some(reason.into());
        self
    }

    #[must_use]
    pub fn failing_cancel(mut self, reason: impl Into<String>) -> Self {
        self.fail_cancel = Some(reason.into());
        self
    }

    #[must_use]
    pub fn scheduled_shipments(&self) -> Vec<String> {
        self.shipments.ids()
    }

    #[must_use]
    pub fn shipment(&self, shipping_id: &str) -> Option<ShipmentRecord> {
        self.shipments.get(shipping_id)
    }
}

impl ShippingService for InMemoryShippingService {
    fn schedule(&self, order_id: &str, user_id: &str) -> Result<String, ServiceError> {
        if let Some(reason) = &self.fail_schedule {
            return Err(ServiceError::Rejected(reason.clone()));
        }

        let shipping_id = self.ids.next_id(SHIPPING_PREFIX);
        self.shipments.insert(
            &shipping_id,
            ShipmentRecord {
                order_id: order_id.to_string(),
                user_id: user_id.to_string(),
            },
        )?;
        debug!(%shipping_id, order_id, "shipment scheduled");
        Ok(shipping_id)
    }

    fn cancel(&self, shipping_id: &str) -> Result<(), ServiceError> {
        if let Some(reason) = &self.fail_cancel {
            return Err(ServiceError::Rejected(reason.clone()));
        }

        self.shipments.remove(shipping_id)?;
        debug!(shipping_id, "shipment cancelled");
        Ok(())
    }
}
