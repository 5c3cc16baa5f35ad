//! Annual rollup
//!
//! Aggregates one employee's completed monthly appraisals for a year into a
//! synthesized annual cycle and a Completed annual appraisal. The output is
//! a pure function of its inputs, so recomputing it is idempotent.

use std::collections::BTreeMap;

use crate::domain::entities::{Appraisal, Cycle, ReviewerAssessment};
use crate::domain::value_objects::{
    mean, round1, AppraisalStatus, AttendanceSummary, EmployeeRef, PerformanceCategory,
};
use crate::error::ValidationError;

use super::insight_synthesizer::synthesize_insights;

/// Synthesized annual cycle and its single appraisal
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualRollup {
    pub cycle: Cycle,
    pub appraisal: Appraisal,
}

/// Monthly records that count toward an employee's year
pub fn eligible_months<'a>(
    employee_id: &str,
    year: i32,
    pairs: impl IntoIterator<Item = (&'a Cycle, &'a Appraisal)>,
) -> Vec<(&'a Cycle, &'a Appraisal)> {
    let mut months: Vec<_> = pairs
        .into_iter()
        .filter(|(cycle, appraisal)| {
            cycle.is_monthly()
                && cycle.year == year
                && appraisal.cycle_id == cycle.id
                && appraisal.employee.id == employee_id
                && appraisal.status == AppraisalStatus::Completed
        })
        .collect();
    months.sort_by(|(a, _), (b, _)| {
        a.month_ordinal
            .cmp(&b.month_ordinal)
            .then_with(|| a.id.cmp(&b.id))
    });
    months
}

/// Build the annual records from completed monthly appraisals
///
/// Pairs that are not Completed monthly records for this employee and year
/// are ignored. Fails when nothing remains.
pub fn roll_up<'a>(
    employee: EmployeeRef,
    year: i32,
    monthly: impl IntoIterator<Item = (&'a Cycle, &'a Appraisal)>,
) -> Result<AnnualRollup, ValidationError> {
    let months = eligible_months(&employee.id, year, monthly);
    let Some((latest_cycle, _)) = months.last() else {
        return Err(ValidationError::NothingToRollUp {
            employee_id: employee.id.clone(),
            year,
        });
    };

    let cycle = Cycle::annual(&employee.id, year, latest_cycle.criteria.clone());

    let final_score = round1(mean(months.iter().filter_map(|(_, a)| a.final_score)));
    let category = PerformanceCategory::from_score(final_score);
    let attendance = AttendanceSummary::combine(
        months.iter().filter_map(|(_, a)| a.attendance_summary.as_ref()),
    );
    let assessments = average_assessments(&months);

    let mut insights = synthesize_insights(&assessments, attendance.as_ref());
    insights.overall_summary = format!(
        "Annual appraisal for {}: {} completed monthly appraisal(s) with an average final score of {:.1}/10.",
        year,
        months.len(),
        final_score
    );

    let completed_at = months
        .iter()
        .filter_map(|(_, a)| a.timestamps.completed_at)
        .max()
        .unwrap_or(months[0].1.timestamps.created_at);

    let appraisal = Appraisal::annual(
        &cycle,
        employee,
        assessments,
        insights,
        final_score,
        category,
        attendance,
        completed_at,
    );

    Ok(AnnualRollup { cycle, appraisal })
}

/// Per-criterion mean of reviewer and self scores, first-seen order
fn average_assessments(months: &[(&Cycle, &Appraisal)]) -> Vec<ReviewerAssessment> {
    struct Acc {
        name: String,
        self_scores: Vec<f64>,
        reviewer_scores: Vec<f64>,
    }

    let mut order: Vec<String> = Vec::new();
    let mut by_criterion: BTreeMap<String, Acc> = BTreeMap::new();

    for (_, appraisal) in months {
        for row in &appraisal.reviewer_assessments {
            let acc = by_criterion
                .entry(row.criterion_id.clone())
                .or_insert_with(|| {
                    order.push(row.criterion_id.clone());
                    Acc {
                        name: row.criterion_name.clone(),
                        self_scores: Vec::new(),
                        reviewer_scores: Vec::new(),
                    }
                });
            acc.self_scores.push(row.self_score);
            acc.reviewer_scores.push(row.reviewer_score);
        }
    }

    order
        .into_iter()
        .filter_map(|id| {
            let acc = by_criterion.remove(&id)?;
            Some(ReviewerAssessment {
                criterion_id: id,
                criterion_name: acc.name,
                self_score: round1(mean(acc.self_scores)),
                reviewer_score: round1(mean(acc.reviewer_scores)),
                reviewer_comments: String::new(),
                is_attendance_auto_suggested: false,
                attendance_adjusted: false,
            })
        })
        .collect()
}
