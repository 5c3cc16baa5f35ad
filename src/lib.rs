//! Appraisal - faculty performance appraisal workflow engine
//!
//! Monthly appraisal cycles move each employee's record through self
//! assessment, HR review and finalization. Completed months roll up into an
//! annual summary per employee.
//!
//! The domain layer is pure; persistence, audit delivery, attendance and
//! feedback facts and the clock are reached through ports so the same
//! workflow runs against the JSON file store, in memory, or test doubles.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    AppraisalFilter, AppraisalUseCase, CycleFilter, CycleUseCase, NewCycle, RollupUseCase,
    WorkflowContext,
};
pub use config::Config;
pub use error::{AppraisalError, AppraisalResult, ValidationError};
