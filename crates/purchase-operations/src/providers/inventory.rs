use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::error::ServiceError;
use crate::traits::InventoryService;

#[derive(Debug, Default)]
struct InventoryState {
    /// Products with limited stock. Products not listed are unlimited.
    stock: HashMap<String, u32>,
    reserved: HashMap<String, u32>,
}

#[derive(Debug, Default)]
pub struct InMemoryInventoryService {
    state: Mutex<InventoryState>,
    fail_reserve: Option<String>,
    fail_restore: Option<String>,
}

impl InMemoryInventoryService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the product to `quantity` available units.
    #[must_use]
    pub fn with_stock(mut self, product_id: impl Into<String>, quantity: u32) -> Self {
        self.state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .stock
            .insert(product_id.into(), quantity);
        self
    }

    #[must_use]
    pub fn failing_reserve(mut self, reason: impl Into<String>) -> Self {
        self.fail_reserve = Some(reason.into());
        self
    }

    #[must_use]
    pub fn failing_restore(mut self, reason: impl Into<String>) -> Self {
        self.fail_restore = Some(reason.into());
        self
    }

    /// Available units, or `None` when the product is unlimited.
    #[must_use]
    pub fn available(&self, product_id: &str) -> Option<u32> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .stock
            .get(product_id)
            .copied()
    }

    /// Units currently taken out of stock by committed reservations.
    #[must_use]
    pub fn reserved(&self, product_id: &str) -> u32 {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .reserved
            .get(product_id)
            .copied()
            .unwrap_or(0)
    }
}

impl InventoryService for InMemoryInventoryService {
    fn reserve(&self, product_id: &str, quantity: u32) -> Result<(), ServiceError> {
        if let Some(reason) = &self.fail_reserve {
            return Err(ServiceError::Rejected(reason.clone()));
        }

        let mut state = self.state.lock().map_err(|_| ServiceError::Poisoned)?;
        let already_reserved = state.reserved.get(product_id).copied().unwrap_or(0);
        let reserved = already_reserved.checked_add(quantity).ok_or_else(|| {
            ServiceError::ReservationOverflow {
                product: product_id.to_string(),
                requested: quantity,
                reserved: already_reserved,
            }
        })?;
        if let Some(available) = state.stock.get_mut(product_id) {
            if *available < quantity {
                return Err(ServiceError::InsufficientStock {
                    product: product_id.to_string(),
                    requested: quantity,
                    available: *available,
                });
            }
            *available -= quantity;
        }
        state.reserved.insert(product_id.to_string(), reserved);
        debug!(product_id, quantity, "stock reserved");
        Ok(())
    }

    fn restore(&self, product_id: &str, quantity: u32) -> Result<(), ServiceError> {
        if let Some(reason) = &self.fail_restore {
            return Err(ServiceError::Rejected(reason.clone()));
        }

        let mut state = self.state.lock().map_err(|_| ServiceError::Poisoned)?;
        if let Some(available) = state.stock.get_mut(product_id) {
            *available = available.saturating_add(quantity);
        }
        if let Some(reserved) = state.reserved.get_mut(product_id) {
            *reserved = reserved.saturating_sub(quantity);
        }
        debug!(product_id, quantity, "stock restored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_products_always_reserve() -> anyhow::Result<()> {
        let service = InMemoryInventoryService::new();

        service.reserve("anything", 1_000)?;

        assert_eq!(service.available("anything"), None);
        assert_eq!(service.reserved("anything"), 1_000);
        Ok(())
    }

    #[test]
    fn reservation_past_counter_limit_is_rejected() -> anyhow::Result<()> {
        let service = InMemoryInventoryService::new();
        service.reserve("bulk", u32::MAX)?;

        let err = service.reserve("bulk", 1).expect_err("counter would overflow");

        assert_eq!(
            err,
            ServiceError::ReservationOverflow {
                product: "bulk".to_string(),
                requested: 1,
                reserved: u32::MAX,
            }
        );
        assert_eq!(service.reserved("bulk"), u32::MAX);

        service.restore("bulk", u32::MAX)?;
        service.reserve("bulk", 1)?;
        assert_eq!(service.reserved("bulk"), 1);
        Ok(())
    }

    #[test]
    fn limited_stock_is_decremented_and_restored() -> anyhow::Result<()> {
        let service = InMemoryInventoryService::new().with_stock("widget", 10);

        service.reserve("widget", 4)?;
        assert_eq!(service.available("widget"), Some(6));
        assert_eq!(service.reserved("widget"), 4);

        service.restore("widget", 4)?;
        assert_eq!(service.available("widget"), Some(10));
        assert_eq!(service.reserved("widget"), 0);
        Ok(())
    }

    #[test]
    fn insufficient_stock_leaves_stock_untouched() {
        let service = InMemoryInventoryService::new().with_stock("widget", 3);

        let err = service.reserve("widget", 5).expect_err("not enough stock");

        assert_eq!(
            err,
            ServiceError::InsufficientStock {
                product: "widget".to_string(),
                requested: 5,
                available: 3,
            }
        );
        assert_eq!(service.available("widget"), Some(3));
        assert_eq!(service.reserved("widget"), 0);
    }
}
