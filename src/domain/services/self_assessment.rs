//! Self-assessment builder
//!
//! Produces the frozen self-assessment rows at submission time, one per
//! cycle criterion, each sourced according to the criterion's kind.

use crate::domain::entities::{Appraisal, Criterion, CriterionKind, SelfAssessment};
use crate::error::ValidationError;

use super::contribution_scorer::score_contributions;

pub const FEEDBACK_NOTE: &str = "System generated from student feedback.";
pub const ATTENDANCE_NOTE: &str = "System generated from attendance records.";

pub fn build_self_assessments(
    criteria: &[Criterion],
    appraisal: &Appraisal,
) -> Result<Vec<SelfAssessment>, ValidationError> {
    let system = appraisal
        .system_scores
        .ok_or(ValidationError::MissingSystemScores)?;
    let contributions = appraisal.contribution_scores.clone().unwrap_or_else(|| {
        score_contributions(&appraisal.research_entries, &appraisal.admin_contributions)
    });

    criteria
        .iter()
        .map(|criterion| -> Result<SelfAssessment, ValidationError> {
            let (self_score, comments) = match criterion.kind {
                CriterionKind::Teaching => (system.student_feedback, FEEDBACK_NOTE.to_string()),
                CriterionKind::Attendance => {
                    (f64::from(system.attendance), ATTENDANCE_NOTE.to_string())
                }
                CriterionKind::Research => (contributions.research, contributions.reasoning.clone()),
                CriterionKind::Administration => {
                    (contributions.admin, contributions.reasoning.clone())
                }
                CriterionKind::Custom => {
                    let custom = appraisal.custom_score(&criterion.id).ok_or_else(|| {
                        ValidationError::MissingSelfScore {
                            name: criterion.name.clone(),
                        }
                    })?;
                    (custom.score, custom.comments.clone())
                }
            };
            Ok(SelfAssessment {
                criterion_id: criterion.id.clone(),
                criterion_name: criterion.name.clone(),
                self_score,
                comments,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        default_criteria, Cycle, NewResearchEntry, ResearchKind, SystemScores,
    };
    use crate::domain::value_objects::EmployeeRef;
    use chrono::{TimeZone, Utc};

    fn appraisal() -> (Cycle, Appraisal) {
        let mut cycle =
            Cycle::monthly("cyc-2025-03", "March 2025", 2025, 3, None, default_criteria()).unwrap();
        cycle.activate().unwrap();
        let appraisal = Appraisal::start(
            &cycle,
            EmployeeRef {
                id: "E1".to_string(),
                name: "Asha".to_string(),
                department: "Physics".to_string(),
            },
            SystemScores {
                student_feedback: 8.2,
                attendance: 9,
            },
            None,
            Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap(),
        );
        (cycle, appraisal)
    }

    #[test]
    fn rows_follow_criterion_sources() {
        let (cycle, mut appraisal) = appraisal();
        let now = appraisal.timestamps.created_at;
        appraisal
            .add_research_entry(NewResearchEntry::new("Paper", ResearchKind::Journal), now)
            .unwrap();
        let conduct = cycle.criterion("conduct").unwrap().clone();
        appraisal.set_custom_score(&conduct, 8.0, "Mentored juniors").unwrap();

        let rows = build_self_assessments(&cycle.criteria, &appraisal).unwrap();
        assert_eq!(rows.len(), 5);

        let by_id = |id: &str| rows.iter().find(|r| r.criterion_id == id).unwrap();
        assert_eq!(by_id("teaching").self_score, 8.2);
        assert_eq!(by_id("teaching").comments, FEEDBACK_NOTE);
        assert_eq!(by_id("attendance").self_score, 9.0);
        assert_eq!(by_id("attendance").comments, ATTENDANCE_NOTE);
        assert_eq!(by_id("research").self_score, 7.0);
        assert_eq!(
            by_id("research").comments,
            "1 journal(s). No administrative contributions recorded."
        );
        assert_eq!(by_id("admin").self_score, 4.0);
        assert_eq!(by_id("conduct").self_score, 8.0);
        assert_eq!(by_id("conduct").comments, "Mentored juniors");
    }

    #[test]
    fn rows_keep_criteria_order() {
        let (cycle, mut appraisal) = appraisal();
        let conduct = cycle.criterion("conduct").unwrap().clone();
        appraisal.set_custom_score(&conduct, 7.0, "").unwrap();
        let rows = build_self_assessments(&cycle.criteria, &appraisal).unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.criterion_id.as_str()).collect();
        assert_eq!(ids, ["teaching", "research", "admin", "attendance", "conduct"]);
    }

    #[test]
    fn custom_criterion_without_score_fails() {
        let (cycle, appraisal) = appraisal();
        let err = build_self_assessments(&cycle.criteria, &appraisal).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingSelfScore {
                name: "Professional Conduct".to_string()
            }
        );
    }
}
