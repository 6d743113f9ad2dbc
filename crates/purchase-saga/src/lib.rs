//! Saga orchestration with reverse-order compensation.
//!
//! A saga is an ordered list of steps that all mutate one shared context.
//! Steps run front to back; the first step reporting
//! [`TransactionStatus::Failed`] halts the run, and every step that had
//! already succeeded is compensated in reverse order (LIFO).

mod audit;
mod builder;
mod context;
mod error;
mod fault;
mod saga;
mod state;
mod status;
mod step;

pub use audit::{SagaAuditLog, StepRecord, StepStatus};
pub use builder::{Empty, HasSteps, SagaBuilder};
pub use context::SagaContext;
pub use error::{CompensationFailure, SagaError, StepFailure, UnknownStepError};
pub use fault::{Fault, FaultInjected};
pub use saga::Saga;
pub use state::SagaState;
pub use status::TransactionStatus;
pub use step::SagaStep;
