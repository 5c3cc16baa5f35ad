//! Attendance-derived score suggestion
//!
//! Converts an attendance summary into the suggested reviewer score for the
//! attendance criterion. Reviewers may override it.

use crate::domain::value_objects::AttendanceSummary;

/// Suggestion used when no attendance summary is available
pub const DEFAULT_ATTENDANCE_SCORE: u8 = 7;

const MIN_SCORE: i32 = 1;
const MAX_SCORE: i32 = 10;

/// Percentage thresholds and their cumulative penalties
const PERCENTAGE_PENALTIES: [(f64, i32); 4] = [(95.0, 1), (90.0, 1), (85.0, 2), (80.0, 2)];

/// Late-arrival thresholds and their cumulative penalties
const LATE_PENALTIES: [(u32, i32); 2] = [(3, 1), (5, 1)];

/// Suggested attendance score in 1..=10
pub fn suggest_attendance_score(summary: Option<&AttendanceSummary>) -> u8 {
    let Some(summary) = summary.filter(|s| s.attendance_percentage.is_finite()) else {
        return DEFAULT_ATTENDANCE_SCORE;
    };

    let pct = summary.attendance_percentage;
    let pct_penalty: i32 = PERCENTAGE_PENALTIES
        .iter()
        .filter(|(threshold, _)| pct < *threshold)
        .map(|(_, penalty)| penalty)
        .sum();
    let late_penalty: i32 = LATE_PENALTIES
        .iter()
        .filter(|(threshold, _)| summary.late_count > *threshold)
        .map(|(_, penalty)| penalty)
        .sum();

    let score = (MAX_SCORE - pct_penalty - late_penalty).clamp(MIN_SCORE, MAX_SCORE);
    score as u8
}
