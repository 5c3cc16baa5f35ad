//! Default data seeding
//!
//! An empty `cycles` collection is seeded with one Active monthly cycle for
//! the current month using the default criteria. `appraisals` seeds empty.

use chrono::NaiveDate;
use tracing::info;

use crate::domain::entities::{current_month, default_criteria, Cycle};
use crate::domain::ports::{Collection, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed {
    today: NaiveDate,
}

impl Seed {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Records to write on first read of an empty collection
    pub fn records(&self, collection: Collection) -> Result<Vec<serde_json::Value>, StoreError> {
        match collection {
            Collection::Cycles => {
                let cycle = self.default_cycle()?;
                info!(cycle = %cycle.id, "seeding default cycle");
                let value = serde_json::to_value(&cycle).map_err(|e| {
                    StoreError::Serialization {
                        collection,
                        message: e.to_string(),
                    }
                })?;
                Ok(vec![value])
            }
            Collection::Appraisals => Ok(Vec::new()),
        }
    }

    fn default_cycle(&self) -> Result<Cycle, StoreError> {
        let (year, month) = current_month(self.today);
        let seed_error = |e: &dyn std::fmt::Display| StoreError::Serialization {
            collection: Collection::Cycles,
            message: format!("default cycle: {}", e),
        };
        let mut cycle = Cycle::monthly(
            Cycle::monthly_id(year, month),
            Cycle::month_name(year, month),
            year,
            month,
            None,
            default_criteria(),
        )
        .map_err(|e| seed_error(&e))?;
        cycle.activate().map_err(|e| seed_error(&e))?;
        Ok(cycle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::CycleStatus;

    #[test]
    fn seeds_active_cycle_for_current_month() {
        let seed = Seed::new(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        let records = seed.records(Collection::Cycles).unwrap();
        assert_eq!(records.len(), 1);

        let cycle: Cycle = serde_json::from_value(records[0].clone()).unwrap();
        assert_eq!(cycle.id, "cyc-2025-03");
        assert_eq!(cycle.name, "March 2025");
        assert_eq!(cycle.status, CycleStatus::Active);
        assert_eq!(cycle.criteria.iter().map(|c| c.weight).sum::<u32>(), 100);
    }

    #[test]
    fn appraisals_seed_empty() {
        let seed = Seed::new(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert!(seed.records(Collection::Appraisals).unwrap().is_empty());
    }
}
