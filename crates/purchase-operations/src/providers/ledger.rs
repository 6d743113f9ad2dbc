use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use crate::error::ServiceError;

/// Records keyed by identifier, guarded for use from many sagas at once.
#[derive(Debug)]
pub(crate) struct Ledger<R> {
    kind: &'static str,
    entries: Mutex<BTreeMap<String, R>>,
}

impl<R: Clone> Ledger<R> {
    pub(crate) fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    pub(crate) fn insert(&self, id: &str, record: R) -> Result<(), ServiceError> {
        self.entries
            .lock()
            .map_err(|_| ServiceError::Poisoned)?
            .insert(id.to_string(), record);
        Ok(())
    }

    pub(crate) fn remove(&self, id: &str) -> Result<R, ServiceError> {
        self.entries
            .lock()
            .map_err(|_| ServiceError::Poisoned)?
            .remove(id)
            .ok_or_else(|| ServiceError::NotFound {
                kind: self.kind,
                id: id.to_string(),
            })
    }

    pub(crate) fn get(&self, id: &str) -> Option<R> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    pub(crate) fn ids(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_remove_round_trips() -> anyhow::Result<()> {
        let ledger = Ledger::new("order");
        ledger.insert("ORD-1", 5_u32)?;

        assert_eq!(ledger.get("ORD-1"), Some(5));
        assert_eq!(ledger.remove("ORD-1")?, 5);
        assert!(ledger.ids().is_empty());
        Ok(())
    }

    #[test]
    fn removing_unknown_id_names_the_kind() {
        let ledger: Ledger<u32> = Ledger::new("payment");

        let err = ledger.remove("PAY-9").expect_err("unknown id");

        assert_eq!(err.to_string(), "unknown payment 'PAY-9'");
    }

    #[test]
    fn ids_are_sorted() -> anyhow::Result<()> {
        let ledger = Ledger::new("shipment");
        ledger.insert("SHP-2", ())?;
        ledger.insert("SHP-1", ())?;

        assert_eq!(ledger.ids(), vec!["SHP-1", "SHP-2"]);
        Ok(())
    }
}
