use purchase_saga::{SagaContext, StepFailure};
use serde::Serialize;

use crate::error::PurchaseError;

/// Everything one purchase attempt knows.
///
/// The inputs are fixed at construction. The outputs are filled in by the
/// steps as they commit and cleared again by their compensations, so after
/// a run the context holds either the full set of identifiers or none of
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseContext {
    user_id: String,
    product_id: String,
    quantity: u32,
    pub(crate) order_id: Option<String>,
    pub(crate) payment_id: Option<String>,
    pub(crate) inventory_updated: bool,
    pub(crate) shipping_id: Option<String>,
    pub(crate) error: Option<String>,
}

impl PurchaseContext {
    /// # Errors
    ///
    /// Returns [`PurchaseError::EmptyField`] if the user or product id is blank.
    pub fn new(
        user_id: impl Into<String>,
        product_id: impl Into<String>,
        quantity: u32,
    ) -> Result<Self, PurchaseError> {
        let user_id = user_id.into();
        let product_id = product_id.into();

        if user_id.trim().is_empty() {
            return Err(PurchaseError::EmptyField { field: "user_id" });
        }
        if product_id.trim().is_empty() {
            return Err(PurchaseError::EmptyField {
                field: "product_id",
            });
        }

        Ok(Self {
            user_id,
            product_id,
            quantity,
            order_id: None,
            payment_id: None,
            inventory_updated: false,
            shipping_id: None,
            error: None,
        })
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    #[must_use]
    pub fn payment_id(&self) -> Option<&str> {
        self.payment_id.as_deref()
    }

    #[must_use]
    pub fn inventory_updated(&self) -> bool {
        self.inventory_updated
    }

    #[must_use]
    pub fn shipping_id(&self) -> Option<&str> {
        self.shipping_id.as_deref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True when every step's output is present.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        self.order_id.is_some()
            && self.payment_id.is_some()
            && self.inventory_updated
            && self.shipping_id.is_some()
    }

    /// True when no step output remains, whatever the error field says.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.order_id.is_none()
            && self.payment_id.is_none()
            && !self.inventory_updated
            && self.shipping_id.is_none()
    }
}

impl SagaContext for PurchaseContext {
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
