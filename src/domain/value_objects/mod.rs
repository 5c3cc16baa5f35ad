//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod attendance;
mod identity;
mod score;
mod status;

pub use attendance::AttendanceSummary;
pub use identity::{EmployeeRef, Identity, Role};
pub use score::{is_valid_score, mean, round1, PerformanceCategory, MAX_SCORE};
pub use status::{AppraisalStatus, CycleKind, CycleStatus};
