use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

pub const ORDER_PREFIX: &str = "ORD";
pub const PAYMENT_PREFIX: &str = "PAY";
pub const SHIPPING_PREFIX: &str = "SHP";

/// Mints `PREFIX-<millis>` identifiers.
///
/// The numeric part is the current Unix time in milliseconds, bumped past
/// the previously issued value when the clock has not advanced, so every
/// identifier from one generator is unique even across threads.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self, prefix: &str) -> String {
        let now = Utc::now().timestamp_millis();
        let mut previous = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(previous + 1);
            match self.last.compare_exchange_weak(
                previous,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return format!("{prefix}-{candidate}"),
                Err(actual) => previous = actual,
            }
        }
    }
}
