//! Upstream fact sources
//!
//! Attendance and student feedback come from other subsystems. The engine
//! treats both as opaque facts and only does arithmetic over them.

use crate::domain::entities::Period;
use crate::domain::value_objects::AttendanceSummary;

pub trait AttendanceSource: Send + Sync {
    /// Summary for one employee over a period, if the upstream has one
    fn attendance_summary(&self, employee_id: &str, period: &Period) -> Option<AttendanceSummary>;
}

pub trait StudentFeedbackSource: Send + Sync {
    /// Mean student feedback score (0..=10) for one employee and cycle
    fn student_feedback(&self, employee_id: &str, cycle_id: &str) -> Option<f64>;
}

/// Source with no data; every lookup falls back to the defaults
pub struct NoFacts;

impl AttendanceSource for NoFacts {
    fn attendance_summary(&self, _employee_id: &str, _period: &Period) -> Option<AttendanceSummary> {
        None
    }
}

impl StudentFeedbackSource for NoFacts {
    fn student_feedback(&self, _employee_id: &str, _cycle_id: &str) -> Option<f64> {
        None
    }
}
