//! Criterion entity - one weighted evaluation dimension
//!
//! The `kind` decides where a criterion's self score comes from when an
//! appraisal is submitted.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Source of a criterion's self score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CriterionKind {
    /// Scored from the student feedback figure
    Teaching,
    /// Scored by the contribution scorer from research entries
    Research,
    /// Scored by the contribution scorer from administrative contributions
    Administration,
    /// Scored from the attendance summary
    Attendance,
    /// Self scored by the employee
    #[default]
    Custom,
}

impl CriterionKind {
    /// Criteria whose self score is computed rather than entered
    pub fn is_system_scored(&self) -> bool {
        !matches!(self, CriterionKind::Custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: String,
    pub name: String,
    pub weight: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: CriterionKind,
}

impl Criterion {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        weight: u32,
        kind: CriterionKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            weight,
            description: String::new(),
            kind,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_attendance(&self) -> bool {
        matches!(self.kind, CriterionKind::Attendance)
    }
}

/// Criteria set used when a cycle is authored without one
pub fn default_criteria() -> Vec<Criterion> {
    vec![
        Criterion::new("teaching", "Teaching Effectiveness", 30, CriterionKind::Teaching)
            .with_description("Classroom delivery as reflected in student feedback"),
        Criterion::new("research", "Research & Publications", 25, CriterionKind::Research)
            .with_description("Journal, conference and book output for the period"),
        Criterion::new(
            "admin",
            "Administrative Contribution",
            20,
            CriterionKind::Administration,
        )
        .with_description("Committee, coordination and mentoring work"),
        Criterion::new(
            "attendance",
            "Attendance & Punctuality",
            15,
            CriterionKind::Attendance,
        )
        .with_description("Presence and punctuality from attendance records"),
        Criterion::new("conduct", "Professional Conduct", 10, CriterionKind::Custom)
            .with_description("Collegiality, ethics and professional behaviour"),
    ]
}

/// Check the authoring rules for a criteria set: non-empty, unique ids,
/// weights within 0..=100 summing to exactly 100, at most one attendance row.
pub fn validate_criteria(criteria: &[Criterion]) -> Result<(), ValidationError> {
    if criteria.is_empty() {
        return Err(ValidationError::NoCriteria);
    }

    let mut seen = HashSet::new();
    for criterion in criteria {
        if !seen.insert(criterion.id.as_str()) {
            return Err(ValidationError::DuplicateCriterion {
                id: criterion.id.clone(),
            });
        }
        if criterion.weight > 100 {
            return Err(ValidationError::WeightOutOfRange {
                name: criterion.name.clone(),
                weight: criterion.weight,
            });
        }
    }

    if criteria.iter().filter(|c| c.is_attendance()).count() > 1 {
        return Err(ValidationError::MultipleAttendanceCriteria);
    }

    let total: u32 = criteria.iter().map(|c| c.weight).sum();
    if total != 100 {
        return Err(ValidationError::WeightTotal { total });
    }

    Ok(())
}
