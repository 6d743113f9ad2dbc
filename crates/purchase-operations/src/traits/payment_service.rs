use crate::error::ServiceError;

/// Charges and refunds payments for orders.
pub trait PaymentService: Send + Sync {
    /// Charges the user for the order and returns the payment identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the charge is declined or the gateway fails.
    fn charge(&self, order_id: &str, user_id: &str) -> Result<String, ServiceError>;

    /// Refunds a previous charge.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment is unknown or the refund fails.
    fn refund(&self, payment_id: &str) -> Result<(), ServiceError>;
}
