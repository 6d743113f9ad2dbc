use crate::error::ServiceError;

/// Creates and cancels orders.
pub trait OrderService: Send + Sync {
    /// Records a new order and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the order cannot be created.
    fn create_order(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: u32,
    ) -> Result<String, ServiceError>;

    /// Cancels a previously created order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is unknown or cannot be cancelled.
    fn cancel_order(&self, order_id: &str) -> Result<(), ServiceError>;
}
