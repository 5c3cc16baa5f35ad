//! Domain Entities
//!
//! Core domain entities that have identity and lifecycle.
//! - `Criterion` - A weighted evaluation dimension
//! - `Cycle` - An evaluation period with a criteria snapshot
//! - `Appraisal` - The per-employee, per-cycle workflow record

mod appraisal;
mod contribution;
mod criterion;
mod cycle;

pub use appraisal::{
    Appraisal, AppraisalInsights, ContributionScores, CustomScore, ReviewerAssessment,
    SelfAssessment, SystemScores, Timestamps,
};
pub use contribution::{
    AdminCategory, AdminContribution, NewAdminContribution, NewResearchEntry, ResearchEntry,
    ResearchKind,
};
pub use criterion::{default_criteria, validate_criteria, Criterion, CriterionKind};
pub use cycle::{current_month, Cycle, Period};
