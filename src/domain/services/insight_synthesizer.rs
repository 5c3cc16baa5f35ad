//! Insight synthesizer
//!
//! Deterministic narrative built from reviewer scores and attendance.
//! Rules run in a fixed order so the same inputs always produce the same
//! text: per-criterion lines first, then the summary tier, then attendance,
//! then fillers for any list left empty.

use crate::domain::entities::{AppraisalInsights, ReviewerAssessment};
use crate::domain::value_objects::{mean, AttendanceSummary};

/// Percentage assumed when no attendance summary exists
pub const DEFAULT_ATTENDANCE_PERCENTAGE: f64 = 85.0;

const STRENGTH_THRESHOLD: f64 = 8.0;
const IMPROVEMENT_THRESHOLD: f64 = 5.0;
const EXCEPTIONAL_AVERAGE: f64 = 8.0;
const GOOD_AVERAGE: f64 = 6.0;
const OUTSTANDING_ATTENDANCE: f64 = 95.0;
const LOW_ATTENDANCE: f64 = 80.0;

pub const RESEARCH_TRAINING: &str =
    "Research methodology and academic writing workshop to strengthen publication output";
pub const ATTENDANCE_TRAINING: &str =
    "Time management and workplace punctuality program";

pub const IMPACT_OUTSTANDING: &str =
    "Outstanding attendance positively contributes to the overall evaluation.";
pub const IMPACT_LOW: &str =
    "Attendance below 80% impacts evaluation and should be addressed.";
pub const IMPACT_NEUTRAL: &str =
    "Attendance is within the acceptable range and has a neutral effect on the evaluation.";

pub const FILLER_STRENGTH: &str = "Consistent contribution across evaluation criteria";
pub const FILLER_IMPROVEMENT: &str = "Continue building on current performance levels";
pub const FILLER_TRAINING: &str =
    "Continuing professional development aligned with departmental goals";

/// Build insights from reviewer assessments and the attendance snapshot
pub fn synthesize_insights(
    assessments: &[ReviewerAssessment],
    attendance: Option<&AttendanceSummary>,
) -> AppraisalInsights {
    let mut strengths = Vec::new();
    let mut improvements = Vec::new();
    let mut training = Vec::new();

    for assessment in assessments {
        let score = assessment.reviewer_score;
        if score >= STRENGTH_THRESHOLD {
            strengths.push(format!(
                "Strong performance in {} ({:.1}/10)",
                assessment.criterion_name, score
            ));
        } else if score <= IMPROVEMENT_THRESHOLD {
            improvements.push(format!(
                "{} needs improvement ({:.1}/10)",
                assessment.criterion_name, score
            ));
            if assessment.criterion_name.contains("Research") {
                training.push(RESEARCH_TRAINING.to_string());
            }
        }
    }

    let average = mean(assessments.iter().map(|a| a.reviewer_score));
    let overall_summary = summary_for(average);

    let pct = attendance
        .map(|a| a.attendance_percentage)
        .unwrap_or(DEFAULT_ATTENDANCE_PERCENTAGE);
    let attendance_impact = if pct >= OUTSTANDING_ATTENDANCE {
        strengths.push(format!("Excellent attendance record ({:.1}%)", pct));
        IMPACT_OUTSTANDING
    } else if pct < LOW_ATTENDANCE {
        improvements.push(format!("Attendance below expectations ({:.1}%)", pct));
        training.push(ATTENDANCE_TRAINING.to_string());
        IMPACT_LOW
    } else {
        IMPACT_NEUTRAL
    };

    fill_if_empty(&mut strengths, FILLER_STRENGTH);
    fill_if_empty(&mut improvements, FILLER_IMPROVEMENT);
    fill_if_empty(&mut training, FILLER_TRAINING);

    AppraisalInsights {
        overall_summary,
        strengths,
        areas_for_improvement: improvements,
        training_suggestions: training,
        attendance_impact: attendance_impact.to_string(),
    }
}

fn summary_for(average: f64) -> String {
    if average >= EXCEPTIONAL_AVERAGE {
        format!(
            "Exceptional performance with an average score of {:.1}/10. \
             Consistently exceeds expectations across the evaluated criteria.",
            average
        )
    } else if average >= GOOD_AVERAGE {
        format!(
            "Good performance with an average score of {:.1}/10, \
             with opportunities for growth in specific areas.",
            average
        )
    } else {
        format!(
            "Performance requires attention with an average score of {:.1}/10. \
             A focused development plan is recommended.",
            average
        )
    }
}

fn fill_if_empty(lines: &mut Vec<String>, filler: &str) {
    if lines.is_empty() {
        lines.push(filler.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, score: f64) -> ReviewerAssessment {
        ReviewerAssessment {
            criterion_id: name.to_lowercase(),
            criterion_name: name.to_string(),
            self_score: score,
            reviewer_score: score,
            reviewer_comments: String::new(),
            is_attendance_auto_suggested: false,
            attendance_adjusted: false,
        }
    }

    fn attendance(pct: f64) -> AttendanceSummary {
        AttendanceSummary {
            total_working_days: 20,
            present_days: 19,
            absent_days: 1,
            leave_days: 0,
            late_count: 0,
            attendance_percentage: pct,
        }
    }

    #[test]
    fn high_scores_become_strengths() {
        let insights = synthesize_insights(
            &[row("Teaching Effectiveness", 9.0), row("Research & Publications", 8.0)],
            Some(&attendance(90.0)),
        );
        assert_eq!(
            insights.strengths,
            vec![
                "Strong performance in Teaching Effectiveness (9.0/10)",
                "Strong performance in Research & Publications (8.0/10)",
            ]
        );
        assert_eq!(insights.areas_for_improvement, vec![FILLER_IMPROVEMENT]);
        assert_eq!(insights.training_suggestions, vec![FILLER_TRAINING]);
        assert_eq!(insights.attendance_impact, IMPACT_NEUTRAL);
        assert!(insights.overall_summary.starts_with("Exceptional"));
    }

    #[test]
    fn weak_research_adds_training() {
        let insights = synthesize_insights(
            &[row("Research & Publications", 4.0), row("Teaching Effectiveness", 7.0)],
            Some(&attendance(88.0)),
        );
        assert_eq!(
            insights.areas_for_improvement,
            vec!["Research & Publications needs improvement (4.0/10)"]
        );
        assert_eq!(insights.training_suggestions, vec![RESEARCH_TRAINING]);
        assert_eq!(insights.strengths, vec![FILLER_STRENGTH]);
        assert!(insights.overall_summary.starts_with("Performance requires attention"));
    }

    #[test]
    fn middle_average_is_good_tier() {
        let insights = synthesize_insights(&[row("A", 6.0), row("B", 7.0)], None);
        assert!(insights.overall_summary.starts_with("Good performance"));
        assert!(insights.overall_summary.contains("6.5/10"));
    }

    #[test]
    fn outstanding_attendance() {
        let insights = synthesize_insights(&[row("A", 7.0)], Some(&attendance(95.0)));
        assert_eq!(insights.strengths, vec!["Excellent attendance record (95.0%)"]);
        assert_eq!(insights.attendance_impact, IMPACT_OUTSTANDING);
    }

    #[test]
    fn low_attendance() {
        let insights = synthesize_insights(&[row("A", 7.0)], Some(&attendance(79.9)));
        assert_eq!(
            insights.areas_for_improvement,
            vec!["Attendance below expectations (79.9%)"]
        );
        assert_eq!(insights.training_suggestions, vec![ATTENDANCE_TRAINING]);
        assert_eq!(insights.attendance_impact, IMPACT_LOW);
    }

    #[test]
    fn missing_attendance_is_treated_as_85_percent() {
        let insights = synthesize_insights(&[row("A", 7.0)], None);
        assert_eq!(insights.attendance_impact, IMPACT_NEUTRAL);
    }

    #[test]
    fn empty_assessments_route_to_lowest_tier_with_fillers() {
        let insights = synthesize_insights(&[], None);
        assert!(insights.overall_summary.contains("0.0/10"));
        assert!(insights.overall_summary.starts_with("Performance requires attention"));
        assert_eq!(insights.strengths.len(), 1);
        assert_eq!(insights.areas_for_improvement.len(), 1);
        assert_eq!(insights.training_suggestions.len(), 1);
    }

    #[test]
    fn narrative_snapshot() {
        let insights = synthesize_insights(
            &[
                row("Teaching Effectiveness", 9.0),
                row("Research & Publications", 5.0),
                row("Attendance & Punctuality", 6.0),
            ],
            Some(&attendance(78.0)),
        );
        let mut rendered = format!("summary: {}\n", insights.overall_summary);
        for line in &insights.strengths {
            rendered.push_str(&format!("strength: {}\n", line));
        }
        for line in &insights.areas_for_improvement {
            rendered.push_str(&format!("improvement: {}\n", line));
        }
        for line in &insights.training_suggestions {
            rendered.push_str(&format!("training: {}\n", line));
        }
        rendered.push_str(&format!("impact: {}", insights.attendance_impact));

        insta::assert_snapshot!(rendered, @r"
summary: Good performance with an average score of 6.7/10, with opportunities for growth in specific areas.
strength: Strong performance in Teaching Effectiveness (9.0/10)
improvement: Research & Publications needs improvement (5.0/10)
improvement: Attendance below expectations (78.0%)
training: Research methodology and academic writing workshop to strengthen publication output
training: Time management and workplace punctuality program
impact: Attendance below 80% impacts evaluation and should be addressed.
");
    }
}
