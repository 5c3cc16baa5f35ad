//! Typed access to the store's collections
//!
//! Every mutating use case reads the whole collection, changes a copy and
//! writes it back once. A failed operation never reaches `save_*`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::domain::entities::{Appraisal, Cycle};
use crate::domain::ports::{Collection, EntityStore, StoreError};
use crate::error::{AppraisalError, AppraisalResult};

pub struct Records<S: EntityStore> {
    store: S,
}

impl<S: EntityStore> Records<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn load<T: DeserializeOwned>(&self, collection: Collection) -> AppraisalResult<Vec<T>> {
        let raw = self.store.get(collection)?;
        debug!(collection = %collection, count = raw.len(), "loaded records");
        raw.into_iter()
            .map(|value| {
                serde_json::from_value(value).map_err(|e| {
                    AppraisalError::Store(StoreError::Serialization {
                        collection,
                        message: e.to_string(),
                    })
                })
            })
            .collect()
    }

    fn save<T: Serialize>(&self, collection: Collection, records: &[T]) -> AppraisalResult<()> {
        let values = records
            .iter()
            .map(|r| {
                serde_json::to_value(r).map_err(|e| StoreError::Serialization {
                    collection,
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(collection = %collection, count = values.len(), "saving records");
        self.store.put(collection, values)?;
        Ok(())
    }

    pub fn cycles(&self) -> AppraisalResult<Vec<Cycle>> {
        self.load(Collection::Cycles)
    }

    pub fn save_cycles(&self, cycles: &[Cycle]) -> AppraisalResult<()> {
        self.save(Collection::Cycles, cycles)
    }

    pub fn appraisals(&self) -> AppraisalResult<Vec<Appraisal>> {
        self.load(Collection::Appraisals)
    }

    pub fn save_appraisals(&self, appraisals: &[Appraisal]) -> AppraisalResult<()> {
        self.save(Collection::Appraisals, appraisals)
    }

    pub fn cycle(&self, id: &str) -> AppraisalResult<Cycle> {
        self.cycles()?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| AppraisalError::not_found("cycle", id))
    }

    pub fn appraisal(&self, id: &str) -> AppraisalResult<Appraisal> {
        self.appraisals()?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| AppraisalError::not_found("appraisal", id))
    }

    /// Apply `change` to one appraisal and persist the collection
    pub fn update_appraisal<T>(
        &self,
        id: &str,
        change: impl FnOnce(&mut Appraisal) -> AppraisalResult<T>,
    ) -> AppraisalResult<(Appraisal, T)> {
        let mut all = self.appraisals()?;
        let record = all
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppraisalError::not_found("appraisal", id))?;
        let out = change(record)?;
        let updated = record.clone();
        self.save_appraisals(&all)?;
        Ok((updated, out))
    }

    /// Apply `change` to one cycle and persist the collection
    pub fn update_cycle(
        &self,
        id: &str,
        change: impl FnOnce(&mut Cycle) -> AppraisalResult<()>,
    ) -> AppraisalResult<Cycle> {
        let mut all = self.cycles()?;
        let record = all
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppraisalError::not_found("cycle", id))?;
        change(record)?;
        let updated = record.clone();
        self.save_cycles(&all)?;
        Ok(updated)
    }
}
