//! Fixture-backed fact sources
//!
//! Attendance file format, keyed by employee id then `YYYY-MM`:
//!
//! ```json
//! { "E1": { "2025-03": { "totalWorkingDays": 22, "presentDays": 21,
//!   "absentDays": 0, "leaveDays": 1, "lateCount": 1 } } }
//! ```
//!
//! Feedback file format, keyed by employee id then cycle id:
//!
//! ```json
//! { "E1": { "cyc-2025-03": 8.4 } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::domain::entities::Period;
use crate::domain::ports::{AttendanceSource, StudentFeedbackSource};
use crate::domain::value_objects::AttendanceSummary;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fixture {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

fn load_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, SourceError> {
    let content = fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|e| SourceError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Raw monthly counts; the percentage is always derived
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttendanceCounts {
    total_working_days: u32,
    present_days: u32,
    #[serde(default)]
    absent_days: u32,
    #[serde(default)]
    leave_days: u32,
    #[serde(default)]
    late_count: u32,
}

fn month_key(date: chrono::NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Attendance by employee and month
#[derive(Debug, Clone, Default)]
pub struct FixtureAttendance {
    months: BTreeMap<String, BTreeMap<String, AttendanceSummary>>,
}

impl FixtureAttendance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        employee_id: impl Into<String>,
        year: i32,
        month: u32,
        summary: AttendanceSummary,
    ) {
        self.months
            .entry(employee_id.into())
            .or_default()
            .insert(format!("{:04}-{:02}", year, month), summary);
    }

    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        let raw: BTreeMap<String, BTreeMap<String, AttendanceCounts>> = load_json(path)?;
        let months = raw
            .into_iter()
            .map(|(employee, by_month)| {
                let by_month = by_month
                    .into_iter()
                    .map(|(month, c)| {
                        let summary = AttendanceSummary::from_counts(
                            c.total_working_days,
                            c.present_days,
                            c.absent_days,
                            c.leave_days,
                            c.late_count,
                        );
                        (month, summary)
                    })
                    .collect();
                (employee, by_month)
            })
            .collect();
        debug!(path = %path.display(), "loaded attendance fixture");
        Ok(Self { months })
    }
}

impl AttendanceSource for FixtureAttendance {
    /// Summaries for every month the period touches, combined
    fn attendance_summary(&self, employee_id: &str, period: &Period) -> Option<AttendanceSummary> {
        let by_month = self.months.get(employee_id)?;
        let first = month_key(period.start);
        let last = month_key(period.end);
        AttendanceSummary::combine(by_month.range(first..=last).map(|(_, s)| s))
    }
}

/// Student feedback by employee and cycle
#[derive(Debug, Clone, Default)]
pub struct FixtureFeedback {
    scores: BTreeMap<String, BTreeMap<String, f64>>,
}

impl FixtureFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, employee_id: impl Into<String>, cycle_id: impl Into<String>, score: f64) {
        self.scores
            .entry(employee_id.into())
            .or_default()
            .insert(cycle_id.into(), score);
    }

    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        let scores = load_json(path)?;
        debug!(path = %path.display(), "loaded feedback fixture");
        Ok(Self { scores })
    }
}

impl StudentFeedbackSource for FixtureFeedback {
    fn student_feedback(&self, employee_id: &str, cycle_id: &str) -> Option<f64> {
        self.scores.get(employee_id)?.get(cycle_id).copied()
    }
}
