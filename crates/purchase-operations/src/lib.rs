//! The product purchase saga.
//!
//! Four steps run in a fixed order against one [`PurchaseContext`]:
//! create the order, take payment, update inventory, schedule shipping.
//! If any of them fails, the ones that already succeeded are undone in
//! reverse order and the context is left with only the error message.

mod context;
mod error;
mod fault;
mod ids;
pub mod providers;
mod runner;
mod saga;
mod steps;
pub mod traits;

pub use context::PurchaseContext;
pub use error::{PurchaseError, ServiceError};
pub use fault::{FaultPlan, INSUFFICIENT_INVENTORY, PlannedFault, PurchaseStep, render_message};
pub use ids::{IdGenerator, ORDER_PREFIX, PAYMENT_PREFIX, SHIPPING_PREFIX};
pub use runner::{PurchaseOutcome, run_concurrently, run_purchase};
pub use saga::{PurchaseServices, purchase_saga, purchase_saga_with_faults};
pub use steps::{CreateOrderStep, ProcessPaymentStep, ProcessShippingStep, UpdateInventoryStep};
