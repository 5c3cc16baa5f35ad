//! Cycle entity - a named evaluation period with a fixed criteria set
//!
//! Monthly cycles are authored by administrators and move
//! Draft → Active → Completed. Annual cycles are synthesized by the rollup,
//! one per employee per year, and are born Completed.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CycleKind, CycleStatus};
use crate::error::{AppraisalError, AppraisalResult, ValidationError};

use super::criterion::{validate_criteria, Criterion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// First to last day of a calendar month
    pub fn for_month(year: i32, month: u32) -> Result<Self, ValidationError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(ValidationError::InvalidMonth { month })?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end = next
            .and_then(|d| d.pred_opt())
            .ok_or(ValidationError::InvalidMonth { month })?;
        Ok(Self { start, end })
    }

    /// January 1st to December 31st
    pub fn for_year(year: i32) -> Option<Self> {
        Some(Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1)?,
            end: NaiveDate::from_ymd_opt(year, 12, 31)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    pub id: String,
    pub name: String,
    pub period: Period,
    pub kind: CycleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_ordinal: Option<u32>,
    pub year: i32,
    pub status: CycleStatus,
    pub criteria: Vec<Criterion>,
    /// Owner of a synthesized annual cycle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

impl Cycle {
    /// Author a monthly cycle in Draft status
    pub fn monthly(
        id: impl Into<String>,
        name: impl Into<String>,
        year: i32,
        month: u32,
        period: Option<Period>,
        criteria: Vec<Criterion>,
    ) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth { month });
        }
        let period = match period {
            Some(p) => Period::new(p.start, p.end)?,
            None => Period::for_month(year, month)?,
        };
        validate_criteria(&criteria)?;

        Ok(Self {
            id: id.into(),
            name: name.into(),
            period,
            kind: CycleKind::Monthly,
            month_ordinal: Some(month),
            year,
            status: CycleStatus::Draft,
            criteria,
            employee_id: None,
        })
    }

    /// Synthesized annual summary cycle for one employee
    pub fn annual(employee_id: &str, year: i32, criteria: Vec<Criterion>) -> Self {
        let period = Period::for_year(year).unwrap_or(Period {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        });
        Self {
            id: Self::annual_id(employee_id, year),
            name: format!("Annual Appraisal {}", year),
            period,
            kind: CycleKind::Annual,
            month_ordinal: None,
            year,
            status: CycleStatus::Completed,
            criteria,
            employee_id: Some(employee_id.to_string()),
        }
    }

    pub fn monthly_id(year: i32, month: u32) -> String {
        format!("cyc-{}-{:02}", year, month)
    }

    pub fn annual_id(employee_id: &str, year: i32) -> String {
        format!("cyc-annual-{}-{}", year, employee_id)
    }

    /// Default display name, e.g. "March 2025"
    pub fn month_name(year: i32, month: u32) -> String {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| format!("{}-{:02}", year, month))
    }

    pub fn is_monthly(&self) -> bool {
        matches!(self.kind, CycleKind::Monthly)
    }

    /// Only active monthly cycles accept new appraisals
    pub fn accepts_appraisals(&self) -> bool {
        self.is_monthly() && matches!(self.status, CycleStatus::Active)
    }

    pub fn criterion(&self, id: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.id == id)
    }

    pub fn attendance_criterion(&self) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.is_attendance())
    }

    /// Replace the criteria snapshot; allowed only while Draft
    pub fn replace_criteria(&mut self, criteria: Vec<Criterion>) -> AppraisalResult<()> {
        self.ensure_status(CycleStatus::Draft, "edit criteria of")?;
        validate_criteria(&criteria)?;
        self.criteria = criteria;
        Ok(())
    }

    /// Draft → Active. Weights are re-validated at the gate.
    pub fn activate(&mut self) -> AppraisalResult<()> {
        self.ensure_status(CycleStatus::Draft, "activate")?;
        validate_criteria(&self.criteria)?;
        self.status = CycleStatus::Active;
        Ok(())
    }

    /// Active → Completed
    pub fn complete(&mut self) -> AppraisalResult<()> {
        self.ensure_status(CycleStatus::Active, "complete")?;
        self.status = CycleStatus::Completed;
        Ok(())
    }

    fn ensure_status(&self, expected: CycleStatus, action: &'static str) -> AppraisalResult<()> {
        if self.status != expected {
            return Err(AppraisalError::InvalidCycleTransition {
                id: self.id.clone(),
                action,
                actual: self.status,
                expected,
            });
        }
        Ok(())
    }
}

/// Default monthly period for a reference date
pub fn current_month(today: NaiveDate) -> (i32, u32) {
    (today.year(), today.month())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::criterion::{default_criteria, CriterionKind};

    fn draft() -> Cycle {
        Cycle::monthly(
            Cycle::monthly_id(2025, 3),
            Cycle::month_name(2025, 3),
            2025,
            3,
            None,
            default_criteria(),
        )
        .unwrap()
    }

    #[test]
    fn monthly_cycle_starts_as_draft_covering_the_month() {
        let cycle = draft();
        assert_eq!(cycle.id, "cyc-2025-03");
        assert_eq!(cycle.name, "March 2025");
        assert_eq!(cycle.status, CycleStatus::Draft);
        assert_eq!(cycle.period.start, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(cycle.period.end, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
        assert!(!cycle.accepts_appraisals());
    }

    #[test]
    fn december_period_ends_on_the_31st() {
        let p = Period::for_month(2024, 12).unwrap();
        assert_eq!(p.end, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        let feb = Period::for_month(2024, 2).unwrap();
        assert_eq!(feb.end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn bad_weights_fail_creation() {
        let mut criteria = default_criteria();
        criteria.pop();
        let err = Cycle::monthly("c", "c", 2025, 3, None, criteria).unwrap_err();
        assert_eq!(err, ValidationError::WeightTotal { total: 90 });
    }

    #[test]
    fn month_out_of_range() {
        let err = Cycle::monthly("c", "c", 2025, 13, None, default_criteria()).unwrap_err();
        assert_eq!(err, ValidationError::InvalidMonth { month: 13 });
    }

    #[test]
    fn inverted_period_is_rejected() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert!(matches!(
            Period::new(start, end),
            Err(ValidationError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn lifecycle_is_forward_only() {
        let mut cycle = draft();
        cycle.activate().unwrap();
        assert!(cycle.accepts_appraisals());
        assert!(matches!(
            cycle.activate(),
            Err(AppraisalError::InvalidCycleTransition { .. })
        ));
        cycle.complete().unwrap();
        assert!(!cycle.accepts_appraisals());
        assert!(cycle.complete().is_err());
    }

    #[test]
    fn criteria_frozen_after_activation() {
        let mut cycle = draft();
        cycle.activate().unwrap();
        assert!(cycle.replace_criteria(default_criteria()).is_err());
    }

    #[test]
    fn replace_criteria_revalidates() {
        let mut cycle = draft();
        let criteria = vec![Criterion::new("only", "Only", 99, CriterionKind::Custom)];
        let err = cycle.replace_criteria(criteria).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(cycle.criteria.len(), 5);
    }

    #[test]
    fn annual_cycle_is_completed_and_owned() {
        let cycle = Cycle::annual("E1", 2025, default_criteria());
        assert_eq!(cycle.status, CycleStatus::Completed);
        assert_eq!(cycle.kind, CycleKind::Annual);
        assert_eq!(cycle.employee_id.as_deref(), Some("E1"));
        assert!(!cycle.accepts_appraisals());
    }

    #[test]
    fn finds_attendance_criterion() {
        let cycle = draft();
        assert_eq!(cycle.attendance_criterion().unwrap().id, "attendance");
        assert!(cycle.criterion("conduct").is_some());
        assert!(cycle.criterion("nope").is_none());
    }
}
