//! In-memory implementations of the service traits.
//!
//! Every provider keeps a ledger of what is currently live, so tests and
//! the demo harness can check that compensation really undid the forward
//! action. Each one can also be told to fail its forward action or its undo.

mod inventory;
mod ledger;
mod order;
mod payment;
mod shipping;

pub use inventory::InMemoryInventoryService;
pub use order::{InMemoryOrderService, OrderRecord};
pub use payment::{InMemoryPaymentService, PaymentRecord};
pub use shipping::{InMemoryShippingService, ShipmentRecord};
