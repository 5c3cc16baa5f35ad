//! Error types for the appraisal engine
//!
//! Uses `thiserror` for library errors. Every error is local and recoverable:
//! the caller corrects the triggering condition and retries the same call.

use thiserror::Error;

use crate::domain::value_objects::{AppraisalStatus, CycleStatus};

/// Result type alias for appraisal operations
pub type AppraisalResult<T> = Result<T, AppraisalError>;

/// Main error type for appraisal operations
#[derive(Error, Debug)]
pub enum AppraisalError {
    /// Input violates a workflow invariant; nothing was mutated
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Referenced cycle or appraisal does not exist
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    /// Appraisal is not in the status the transition requires
    #[error("cannot {action} appraisal '{id}': status is '{actual}', expected '{expected}'")]
    InvalidTransition {
        id: String,
        action: &'static str,
        actual: AppraisalStatus,
        expected: AppraisalStatus,
    },

    /// Cycle is not in the status the operation requires
    #[error("cannot {action} cycle '{id}': status is '{actual}', expected '{expected}'")]
    InvalidCycleTransition {
        id: String,
        action: &'static str,
        actual: CycleStatus,
        expected: CycleStatus,
    },

    /// Acting identity is not allowed to perform the operation
    #[error("permission denied: {actor} may not {action}")]
    PermissionDenied { actor: String, action: String },

    /// Persistence collaborator failed
    #[error(transparent)]
    Store(#[from] crate::domain::ports::StoreError),
}

impl AppraisalError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        AppraisalError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// True for errors the caller can fix by changing its input
    pub fn is_validation(&self) -> bool {
        matches!(self, AppraisalError::Validation(_))
    }
}

/// Invariant violations. Each message names the rule that was broken.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("total weightage must equal 100% (criteria sum to {total}%)")]
    WeightTotal { total: u32 },

    #[error("criterion '{name}' weight must be between 0 and 100 (got {weight})")]
    WeightOutOfRange { name: String, weight: u32 },

    #[error("criterion id '{id}' appears more than once")]
    DuplicateCriterion { id: String },

    #[error("a cycle may contain at most one attendance criterion")]
    MultipleAttendanceCriteria,

    #[error("cycle must define at least one criterion")]
    NoCriteria,

    #[error("cycle period start {start} is after end {end}")]
    InvalidPeriod { start: String, end: String },

    #[error("month ordinal must be between 1 and 12 (got {month})")]
    InvalidMonth { month: u32 },

    #[error("cycle '{id}' already exists")]
    DuplicateCycle { id: String },

    #[error("cycle '{cycle_id}' is not active; appraisals can only be started for active cycles")]
    CycleNotActive { cycle_id: String },

    #[error("appraisals can only be started for monthly cycles ('{cycle_id}' is annual)")]
    CycleNotMonthly { cycle_id: String },

    #[error("an appraisal already exists for employee '{employee_id}' in cycle '{cycle_id}'")]
    DuplicateAppraisal {
        employee_id: String,
        cycle_id: String,
    },

    #[error("system scores must exist before submission")]
    MissingSystemScores,

    #[error("self score required for criterion '{name}'")]
    MissingSelfScore { name: String },

    #[error("criterion '{criterion_id}' is not part of this cycle")]
    UnknownCriterion { criterion_id: String },

    #[error("criterion '{name}' is system scored and cannot be self scored")]
    NotSelfScorable { name: String },

    #[error("score for '{name}' must be between 0 and 10 (got {score})")]
    ScoreOutOfRange { name: String, score: f64 },

    #[error("{kind} entry '{id}' not found in this appraisal")]
    EntryNotFound { kind: &'static str, id: String },

    #[error("entry title must not be empty")]
    EmptyTitle,

    #[error("review must contain exactly one row per assessed criterion (missing '{criterion_id}')")]
    ReviewRowMissing { criterion_id: String },

    #[error("review contains a row for unassessed criterion '{criterion_id}'")]
    ReviewRowUnexpected { criterion_id: String },

    #[error("comment required for adjusted attendance score")]
    AttendanceCommentRequired,

    #[error("attendance score differs from the suggested {suggested} but is not marked as adjusted")]
    AttendanceAdjustmentUnflagged { suggested: f64 },

    #[error("no completed monthly appraisals for employee '{employee_id}' in {year}")]
    NothingToRollUp { employee_id: String, year: i32 },
}
