mod inventory_service;
mod order_service;
mod payment_service;
mod shipping_service;

pub use inventory_service::InventoryService;
pub use order_service::OrderService;
pub use payment_service::PaymentService;
pub use shipping_service::ShippingService;
