use crate::error::ServiceError;

/// Schedules and cancels shipments.
pub trait ShippingService: Send + Sync {
    /// Schedules delivery of the order and returns the shipment identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the shipment cannot be scheduled.
    fn schedule(&self, order_id: &str, user_id: &str) -> Result<String, ServiceError>;

    /// Cancels a scheduled shipment.
    ///
    /// # Errors
    ///
    /// Returns an error if the shipment is unknown or cannot be cancelled.
    fn cancel(&self, shipping_id: &str) -> Result<(), ServiceError>;
}
