//! In-memory store
//!
//! Indexed container behind the `EntityStore` port. Used by tests and by the
//! `memory` backend.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::domain::ports::{Collection, EntityStore, StoreError};

use super::seed::Seed;

#[derive(Default)]
pub struct InMemoryStore {
    collections: Mutex<BTreeMap<Collection, Vec<serde_json::Value>>>,
    seed: Option<Seed>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed default data on first read of an empty collection
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl EntityStore for InMemoryStore {
    fn get(&self, collection: Collection) -> Result<Vec<serde_json::Value>, StoreError> {
        let mut collections = self.collections.lock().map_err(StoreError::access)?;
        let records = collections.entry(collection).or_default();
        if records.is_empty() {
            if let Some(seed) = &self.seed {
                *records = seed.records(collection)?;
            }
        }
        Ok(records.clone())
    }

    fn put(
        &self,
        collection: Collection,
        records: Vec<serde_json::Value>,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.lock().map_err(StoreError::access)?;
        collections.insert(collection, records);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn unseeded_store_starts_empty() {
        let store = InMemoryStore::new();
        assert!(store.get(Collection::Cycles).unwrap().is_empty());
    }

    #[test]
    fn put_replaces_collection() {
        let store = InMemoryStore::new();
        store
            .put(Collection::Appraisals, vec![json!({"id": "a"}), json!({"id": "b"})])
            .unwrap();
        store
            .put(Collection::Appraisals, vec![json!({"id": "c"})])
            .unwrap();
        let records = store.get(Collection::Appraisals).unwrap();
        assert_eq!(records, vec![json!({"id": "c"})]);
        assert!(store.get(Collection::Cycles).unwrap().is_empty());
    }

    #[test]
    fn seeded_store_fills_empty_cycles_once() {
        let store = InMemoryStore::new().with_seed(Seed::new(
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        ));
        let first = store.get(Collection::Cycles).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0]["id"], "cyc-2025-07");

        store
            .put(Collection::Cycles, vec![json!({"id": "custom"})])
            .unwrap();
        assert_eq!(store.get(Collection::Cycles).unwrap()[0]["id"], "custom");
    }
}
