use std::sync::Arc;

use tracing::debug;

use super::ledger::Ledger;
use crate::error::ServiceError;
use crate::ids::{IdGenerator, PAYMENT_PREFIX};
use crate::traits::PaymentService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    pub order_id: String,
    pub user_id: String,
}

#[derive(Debug)]
pub struct InMemoryPaymentService {
    ids: Arc<IdGenerator>,
    payments: Ledger<PaymentRecord>,
    fail_charge: Option<String>,
    fail_refund: Option<String>,
}

impl InMemoryPaymentService {
    #[must_use]
    pub fn new(ids: Arc<IdGenerator>) -> Self {
        Self {
            ids,
            payments: Ledger::new("payment"),
            fail_charge: None,
            fail_refund: None,
        }
    }

    /// Decline every charge with `reason`.
    #[must_use]
    pub fn declining(mut self, reason: impl Into<String>) -> Self {
        self.fail_charge = Some(reason.into());
        self
    }

    /// Make every refund fail with `reason`.
    #[must_use]
    pub fn failing_refund(mut self, reason: impl Into<String>) -> Self {
        self.fail_refund = Some(reason.into());
        self
    }

    /// Identifiers of charges that have not been refunded.
    #[must_use]
    pub fn settled_payments(&self) -> Vec<String> {
        self.payments.ids()
    }

    #[must_use]
    pub fn payment(&self, payment_id: &str) -> Option<PaymentRecord> {
        self.payments.get(payment_id)
    }
}

impl PaymentService for InMemoryPaymentService {
    fn charge(&self, order_id: &str, user_id: &str) -> Result<String, ServiceError> {
        if let Some(reason) = &self.fail_charge {
            return Err(ServiceError::Rejected(reason.clone()));
        }

        let payment_id = self.ids.next_id(PAYMENT_PREFIX);
        self.payments.insert(
            &payment_id,
            PaymentRecord {
                order_id: order_id.to_string(),
                user_id: user_id.to_string(),
            },
        )?;
        debug!(%payment_id, order_id, "payment settled");
        Ok(payment_id)
    }

    fn refund(&self, payment_id: &str) -> Result<(), ServiceError> {
        if let Some(reason) = &self.fail_refund {
            return Err(ServiceError::Rejected(reason.clone()));
        }

        self.payments.remove(payment_id)?;
        debug!(payment_id, "payment refunded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_links_payment_to_order() -> anyhow::Result<()> {
        let service = InMemoryPaymentService::new(Arc::new(IdGenerator::new()));

        let payment_id = service.charge("ORD-1", "u")?;

        assert!(payment_id.starts_with("PAY-"));
        assert_eq!(
            service.payment(&payment_id).map(|p| p.order_id),
            Some("ORD-1".to_string())
        );
        Ok(())
    }

    #[test]
    fn refund_removes_payment() -> anyhow::Result<()> {
        let service = InMemoryPaymentService::new(Arc::new(IdGenerator::new()));
        let payment_id = service.charge("ORD-1", "u")?;

        service.refund(&payment_id)?;

        assert!(service.settled_payments().is_empty());
        Ok(())
    }

    #[test]
    fn refunding_twice_reports_unknown_payment() -> anyhow::Result<()> {
        let service = InMemoryPaymentService::new(Arc::new(IdGenerator::new()));
        let payment_id = service.charge("ORD-1", "u")?;
        service.refund(&payment_id)?;

        let err = service.refund(&payment_id).expect_err("second refund");

        assert!(matches!(err, ServiceError::NotFound { kind: "payment", .. }));
        Ok(())
    }

    #[test]
    fn declining_service_never_settles() {
        let service =
            InMemoryPaymentService::new(Arc::new(IdGenerator::new())).declining("card expired");

        assert!(service.charge("ORD-1", "u").is_err());
        assert!(service.settled_payments().is_empty());
    }
}
