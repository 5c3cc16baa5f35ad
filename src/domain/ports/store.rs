//! EntityStore port
//!
//! Synchronous key → list storage for the two logical collections. No
//! transactions; uniqueness is enforced by the use cases, not the store.

use std::path::PathBuf;

/// Logical collection names
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    Cycles,
    Appraisals,
}

impl Collection {
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Cycles => "cycles",
            Collection::Appraisals => "appraisals",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

pub trait EntityStore: Send + Sync {
    /// Every record in the collection; empty when the key was never written
    fn get(&self, collection: Collection) -> Result<Vec<serde_json::Value>, StoreError>;

    /// Replace the whole collection
    fn put(&self, collection: Collection, records: Vec<serde_json::Value>)
        -> Result<(), StoreError>;
}

impl<T: EntityStore + ?Sized> EntityStore for std::sync::Arc<T> {
    fn get(&self, collection: Collection) -> Result<Vec<serde_json::Value>, StoreError> {
        (**self).get(collection)
    }

    fn put(
        &self,
        collection: Collection,
        records: Vec<serde_json::Value>,
    ) -> Result<(), StoreError> {
        (**self).put(collection, records)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access store: {message}")]
    Access { message: String },

    #[error("invalid {collection} record: {message}")]
    Serialization {
        collection: Collection,
        message: String,
    },

    #[error(
        "store file corrupted: {path}\n  → Fix: restore from backup or delete the file to reseed\n  → Details: {message}"
    )]
    Corrupted { path: PathBuf, message: String },
}

impl StoreError {
    pub fn access(err: impl std::fmt::Display) -> Self {
        StoreError::Access {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_keys() {
        assert_eq!(Collection::Cycles.key(), "cycles");
        assert_eq!(Collection::Appraisals.to_string(), "appraisals");
    }

    #[test]
    fn corrupted_error_carries_fix_hint() {
        let err = StoreError::Corrupted {
            path: PathBuf::from("/data/cycles.json"),
            message: "expected value at line 1".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("/data/cycles.json"));
        assert!(text.contains("→ Fix"));
    }
}
