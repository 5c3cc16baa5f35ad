//! Attendance summary value object
//!
//! Supplied by the attendance collaborator as an opaque upstream fact. The
//! engine only does arithmetic over it.

use serde::{Deserialize, Serialize};

use super::score::round1;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub total_working_days: u32,
    pub present_days: u32,
    pub absent_days: u32,
    pub leave_days: u32,
    pub late_count: u32,
    pub attendance_percentage: f64,
}

impl AttendanceSummary {
    /// Build a summary, deriving the percentage from present / working days
    pub fn from_counts(
        total_working_days: u32,
        present_days: u32,
        absent_days: u32,
        leave_days: u32,
        late_count: u32,
    ) -> Self {
        Self {
            total_working_days,
            present_days,
            absent_days,
            leave_days,
            late_count,
            attendance_percentage: percentage(present_days, total_working_days),
        }
    }

    /// Additive union of several summaries; the percentage is recomputed
    /// from the summed counts, never averaged. `None` for an empty input.
    pub fn combine<'a, I>(summaries: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a AttendanceSummary>,
    {
        let mut iter = summaries.into_iter().peekable();
        iter.peek()?;
        let (total, present, absent, leave, late) =
            iter.fold((0, 0, 0, 0, 0), |(t, p, a, l, late), s| {
                (
                    t + s.total_working_days,
                    p + s.present_days,
                    a + s.absent_days,
                    l + s.leave_days,
                    late + s.late_count,
                )
            });
        Some(Self::from_counts(total, present, absent, leave, late))
    }
}

fn percentage(present: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        round1(present as f64 * 100.0 / total as f64)
    }
}
