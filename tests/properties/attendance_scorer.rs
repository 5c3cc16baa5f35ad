//! Property tests for the attendance score suggestion.

use proptest::prelude::*;

use appraisal::domain::services::suggest_attendance_score;
use appraisal::domain::value_objects::AttendanceSummary;

fn summary(pct: f64, late: u32) -> AttendanceSummary {
    AttendanceSummary {
        total_working_days: 22,
        present_days: 20,
        absent_days: 1,
        leave_days: 1,
        late_count: late,
        attendance_percentage: pct,
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The suggestion always lands in 1..=10.
    #[test]
    fn property_suggestion_is_bounded(pct in 0.0f64..=100.0, late in 0u32..60) {
        let score = suggest_attendance_score(Some(&summary(pct, late)));
        prop_assert!((1..=10).contains(&score));
    }

    /// PROPERTY: Better attendance never lowers the suggestion.
    #[test]
    fn property_higher_percentage_never_scores_lower(
        a in 0.0f64..=100.0,
        b in 0.0f64..=100.0,
        late in 0u32..10,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            suggest_attendance_score(Some(&summary(high, late)))
                >= suggest_attendance_score(Some(&summary(low, late)))
        );
    }

    /// PROPERTY: More late arrivals never raise the suggestion.
    #[test]
    fn property_more_lates_never_score_higher(
        pct in 0.0f64..=100.0,
        late in 0u32..20,
        extra in 0u32..20,
    ) {
        prop_assert!(
            suggest_attendance_score(Some(&summary(pct, late + extra)))
                <= suggest_attendance_score(Some(&summary(pct, late)))
        );
    }

    /// PROPERTY: Counts-derived percentages stay within 0..=100.
    #[test]
    fn property_derived_percentage_is_bounded(total in 0u32..40, present in 0u32..40) {
        let present = present.min(total);
        let summary = AttendanceSummary::from_counts(total, present, total - present, 0, 0);
        prop_assert!((0.0..=100.0).contains(&summary.attendance_percentage));
    }
}
