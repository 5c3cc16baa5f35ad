//! Cycle authoring inputs and list filters

use crate::domain::entities::{default_criteria, Criterion, Period};
use crate::domain::value_objects::{CycleKind, CycleStatus};

/// Input for authoring a monthly cycle
#[derive(Debug, Clone)]
pub struct NewCycle {
    pub year: i32,
    pub month: u32,
    /// Defaults to the month's display name, e.g. "March 2025"
    pub name: Option<String>,
    /// Defaults to the calendar month
    pub period: Option<Period>,
    pub criteria: Vec<Criterion>,
    /// Activate immediately after creation
    pub activate: bool,
}

impl NewCycle {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            name: None,
            period: None,
            criteria: default_criteria(),
            activate: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_criteria(mut self, criteria: Vec<Criterion>) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn activated(mut self) -> Self {
        self.activate = true;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct CycleFilter {
    pub kind: Option<CycleKind>,
    pub status: Option<CycleStatus>,
    pub year: Option<i32>,
}

impl CycleFilter {
    pub fn matches(&self, kind: CycleKind, status: CycleStatus, year: i32) -> bool {
        self.kind.map_or(true, |k| k == kind)
            && self.status.map_or(true, |s| s == status)
            && self.year.map_or(true, |y| y == year)
    }
}
