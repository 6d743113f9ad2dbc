use crate::error::ServiceError;

/// Takes product stock out of inventory and puts it back.
pub trait InventoryService: Send + Sync {
    /// Removes `quantity` units of the product from available stock.
    ///
    /// # Errors
    ///
    /// Returns an error if there is not enough stock or the update fails.
    fn reserve(&self, product_id: &str, quantity: u32) -> Result<(), ServiceError>;

    /// Returns `quantity` units of the product to available stock.
    ///
    /// # Errors
    ///
    /// Returns an error if the stock cannot be restored.
    fn restore(&self, product_id: &str, quantity: u32) -> Result<(), ServiceError>;
}
