use purchase_saga::UnknownStepError;
use thiserror::Error;

/// Failure reported by one of the external collaborators a step calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Rejected(String),

    #[error("unknown {kind} '{id}'")]
    NotFound { kind: &'static str, id: String },

    #[error("insufficient stock for product {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: u32,
        available: u32,
    },

    #[error("cannot reserve {requested} more units of product {product}: {reserved} already reserved")]
    ReservationOverflow {
        product: String,
        requested: u32,
        reserved: u32,
    },

    #[error("no order to {action}")]
    MissingOrder { action: &'static str },

    #[error("service state lock poisoned")]
    Poisoned,
}

#[derive(Debug, Error)]
pub enum PurchaseError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("unknown step '{step}' (available: {available})")]
    UnknownStep { step: String, available: String },

    #[error("purchase worker thread panicked")]
    WorkerPanicked,

    #[error("failed to spawn purchase worker thread")]
    WorkerSpawn(#[source] std::io::Error),
}

impl From<UnknownStepError> for PurchaseError {
    fn from(err: UnknownStepError) -> Self {
        Self::UnknownStep {
            step: err.step,
            available: err.available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_message_names_product_and_amounts() {
        let err = ServiceError::InsufficientStock {
            product: "widget".to_string(),
            requested: 5,
            available: 2,
        };

        assert_eq!(
            err.to_string(),
            "insufficient stock for product widget: requested 5, available 2"
        );
    }

    #[test]
    fn reservation_overflow_message_names_product() {
        let err = ServiceError::ReservationOverflow {
            product: "widget".to_string(),
            requested: 1,
            reserved: u32::MAX,
        };

        assert_eq!(
            err.to_string(),
            "cannot reserve 1 more units of product widget: 4294967295 already reserved"
        );
    }

    #[test]
    fn unknown_step_converts_from_saga_error() {
        let err: PurchaseError = UnknownStepError {
            step: "teleport".to_string(),
            available: "create_order".to_string(),
        }
        .into();

        assert!(matches!(err, PurchaseError::UnknownStep { ref step, .. } if step == "teleport"));
    }

    #[test]
    fn empty_field_message() {
        let err = PurchaseError::EmptyField { field: "user_id" };

        assert_eq!(err.to_string(), "user_id must not be empty");
    }
}
