use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::context::PurchaseContext;
use crate::error::PurchaseError;

/// Failure message used by the canonical out-of-stock scenario.
pub const INSUFFICIENT_INVENTORY: &str = "Insufficient inventory for product {product}";

/// The four purchase steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStep {
    CreateOrder,
    ProcessPayment,
    UpdateInventory,
    ProcessShipping,
}

impl PurchaseStep {
    pub const ALL: [Self; 4] = [
        Self::CreateOrder,
        Self::ProcessPayment,
        Self::UpdateInventory,
        Self::ProcessShipping,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::CreateOrder => "create_order",
            Self::ProcessPayment => "process_payment",
            Self::UpdateInventory => "update_inventory",
            Self::ProcessShipping => "process_shipping",
        }
    }
}

impl fmt::Display for PurchaseStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts `update_inventory`, `update-inventory` and `UpdateInventory`.
impl FromStr for PurchaseStep {
    type Err = PurchaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|step| normalize(step.name()) == wanted)
            .ok_or_else(|| PurchaseError::UnknownStep {
                step: s.to_string(),
                available: Self::ALL
                    .iter()
                    .map(|step| step.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Fill `{user}`, `{product}` and `{quantity}` from the context.
#[must_use]
pub fn render_message(template: &str, ctx: &PurchaseContext) -> String {
    template
        .replace("{user}", ctx.user_id())
        .replace("{product}", ctx.product_id())
        .replace("{quantity}", &ctx.quantity().to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFault {
    pub step: PurchaseStep,
    /// Message template, see [`render_message`].
    pub message: String,
}

/// Which steps should fail on purpose, and with what message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaultPlan {
    faults: Vec<PlannedFault>,
}

impl FaultPlan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn fail_at(step: PurchaseStep, message: impl Into<String>) -> Self {
        Self::new().and_fail_at(step, message)
    }

    /// Add a fault, replacing any earlier one for the same step.
    #[must_use]
    pub fn and_fail_at(mut self, step: PurchaseStep, message: impl Into<String>) -> Self {
        self.faults.retain(|fault| fault.step != step);
        self.faults.push(PlannedFault {
            step,
            message: message.into(),
        });
        self
    }

    /// Inventory refuses the purchase with the canonical message.
    #[must_use]
    pub fn out_of_stock() -> Self {
        Self::fail_at(PurchaseStep::UpdateInventory, INSUFFICIENT_INVENTORY)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faults.is_empty()
    }

    #[must_use]
    pub fn faults(&self) -> &[PlannedFault] {
        &self.faults
    }
}
