//! JSON file store
//!
//! One `<collection>.json` file per collection under a data directory.
//! Writes go through a temp file and rename while holding an exclusive
//! lock on `.store.lock`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::domain::ports::{Collection, EntityStore, StoreError};

use super::seed::Seed;

const LOCK_FILE: &str = ".store.lock";

pub struct JsonFileStore {
    dir: PathBuf,
    seed: Option<Seed>,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{}.json", collection.key()))
    }

    fn with_lock<T>(
        &self,
        f: impl FnOnce() -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        fs::create_dir_all(&self.dir).map_err(StoreError::access)?;
        let lock_file = fs::File::create(self.dir.join(LOCK_FILE)).map_err(StoreError::access)?;
        lock_file.lock_exclusive().map_err(StoreError::access)?;

        // Released when `lock_file` drops
        f()
    }

    fn read(&self, collection: Collection) -> Result<Vec<serde_json::Value>, StoreError> {
        let path = self.path_for(collection);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path).map_err(StoreError::access)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| StoreError::Corrupted {
            path,
            message: e.to_string(),
        })
    }

    fn write(
        &self,
        collection: Collection,
        records: &[serde_json::Value],
    ) -> Result<(), StoreError> {
        let path = self.path_for(collection);
        let content =
            serde_json::to_string_pretty(records).map_err(|e| StoreError::Serialization {
                collection,
                message: e.to_string(),
            })?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(StoreError::access)?;
        tmp.write_all(content.as_bytes())
            .map_err(StoreError::access)?;
        tmp.write_all(b"\n").map_err(StoreError::access)?;
        tmp.persist(&path).map_err(|e| StoreError::access(e.error))?;

        debug!(path = %path.display(), count = records.len(), "wrote collection");
        Ok(())
    }
}

impl EntityStore for JsonFileStore {
    fn get(&self, collection: Collection) -> Result<Vec<serde_json::Value>, StoreError> {
        self.with_lock(|| {
            let records = self.read(collection)?;
            match &self.seed {
                Some(seed) if records.is_empty() => {
                    let seeded = seed.records(collection)?;
                    if !seeded.is_empty() {
                        self.write(collection, &seeded)?;
                    }
                    Ok(seeded)
                }
                _ => Ok(records),
            }
        })
    }

    fn put(
        &self,
        collection: Collection,
        records: Vec<serde_json::Value>,
    ) -> Result<(), StoreError> {
        self.with_lock(|| self.write(collection, &records))
    }
}
