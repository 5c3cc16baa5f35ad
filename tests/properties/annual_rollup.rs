//! Property tests for the annual rollup.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use appraisal::domain::entities::{
    default_criteria, Appraisal, AppraisalInsights, Cycle, ReviewerAssessment, SelfAssessment,
    SystemScores,
};
use appraisal::domain::services::roll_up;
use appraisal::domain::value_objects::{EmployeeRef, PerformanceCategory};

fn employee() -> EmployeeRef {
    EmployeeRef {
        id: "E1".to_string(),
        name: "Asha Rao".to_string(),
        department: "Physics".to_string(),
    }
}

fn completed_month(month: u32, score: f64) -> (Cycle, Appraisal) {
    let mut cycle = Cycle::monthly(
        Cycle::monthly_id(2025, month),
        Cycle::month_name(2025, month),
        2025,
        month,
        None,
        default_criteria(),
    )
    .unwrap();
    cycle.activate().unwrap();
    let at = Utc.with_ymd_and_hms(2025, month, 25, 12, 0, 0).unwrap();
    let mut appraisal = Appraisal::start(
        &cycle,
        employee(),
        SystemScores {
            student_feedback: 7.0,
            attendance: 7,
        },
        None,
        at,
    );
    let rows = cycle
        .criteria
        .iter()
        .map(|c| SelfAssessment {
            criterion_id: c.id.clone(),
            criterion_name: c.name.clone(),
            self_score: score,
            comments: String::new(),
        })
        .collect();
    appraisal.submit(rows, at).unwrap();
    let reviewed = cycle
        .criteria
        .iter()
        .map(|c| ReviewerAssessment {
            criterion_id: c.id.clone(),
            criterion_name: c.name.clone(),
            self_score: score,
            reviewer_score: score,
            reviewer_comments: String::new(),
            is_attendance_auto_suggested: c.is_attendance(),
            attendance_adjusted: false,
        })
        .collect();
    let insights = AppraisalInsights {
        overall_summary: String::new(),
        strengths: Vec::new(),
        areas_for_improvement: Vec::new(),
        training_suggestions: Vec::new(),
        attendance_impact: String::new(),
    };
    appraisal.record_review("HR1", reviewed, insights, at).unwrap();
    appraisal
        .finalize(score, PerformanceCategory::from_score(score), "", at)
        .unwrap();
    (cycle, appraisal)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Rolling up the same months twice yields identical records,
    /// and the annual score lies within the monthly range.
    #[test]
    fn property_rollup_is_idempotent_and_bounded(
        scores in proptest::collection::vec(0u32..=100, 1..=12),
    ) {
        let months: Vec<(Cycle, Appraisal)> = scores
            .iter()
            .enumerate()
            .map(|(i, s)| completed_month(i as u32 + 1, f64::from(*s) / 10.0))
            .collect();
        let pairs: Vec<(&Cycle, &Appraisal)> = months.iter().map(|(c, a)| (c, a)).collect();

        let first = roll_up(employee(), 2025, pairs.clone()).unwrap();
        let second = roll_up(employee(), 2025, pairs).unwrap();
        prop_assert_eq!(&first, &second);

        let score = first.appraisal.final_score.unwrap();
        let min = scores.iter().min().map(|s| f64::from(*s) / 10.0).unwrap();
        let max = scores.iter().max().map(|s| f64::from(*s) / 10.0).unwrap();
        prop_assert!(score >= min && score <= max);
        prop_assert_eq!(
            first.appraisal.category,
            Some(PerformanceCategory::from_score(score))
        );
    }
}
