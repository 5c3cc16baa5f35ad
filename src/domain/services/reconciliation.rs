//! Review reconciliation
//!
//! Merges self scores with reviewer overrides:
//! - seeds the reviewer's working copy from the frozen self assessment
//! - enforces the attendance override rule before the Reviewed gate
//! - computes the editable finalization defaults

use crate::domain::entities::{Appraisal, Criterion, ReviewerAssessment};
use crate::domain::value_objects::{is_valid_score, round1, PerformanceCategory};
use crate::error::ValidationError;

fn differs(a: f64, b: f64) -> bool {
    (a - b).abs() > f64::EPSILON
}

/// Reviewer's working copy of the assessment rows
///
/// Created by Start Review; not persisted until the review is submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDraft {
    appraisal_id: String,
    attendance_suggestion: Option<f64>,
    rows: Vec<ReviewerAssessment>,
}

impl ReviewDraft {
    /// One row per self-assessed criterion, reviewer score seeded from the
    /// self score. The attendance row is seeded from the system suggestion.
    pub fn seed(appraisal: &Appraisal, criteria: &[Criterion]) -> Self {
        let suggestion = appraisal.attendance_suggestion();
        let rows = appraisal
            .self_assessments
            .iter()
            .map(|sa| {
                let is_attendance = criteria
                    .iter()
                    .any(|c| c.id == sa.criterion_id && c.is_attendance());
                let seeded = match (is_attendance, suggestion) {
                    (true, Some(s)) => s,
                    _ => sa.self_score,
                };
                ReviewerAssessment {
                    criterion_id: sa.criterion_id.clone(),
                    criterion_name: sa.criterion_name.clone(),
                    self_score: sa.self_score,
                    reviewer_score: seeded,
                    reviewer_comments: String::new(),
                    is_attendance_auto_suggested: is_attendance,
                    attendance_adjusted: false,
                }
            })
            .collect();

        Self {
            appraisal_id: appraisal.id.clone(),
            attendance_suggestion: suggestion,
            rows,
        }
    }

    pub fn appraisal_id(&self) -> &str {
        &self.appraisal_id
    }

    pub fn rows(&self) -> &[ReviewerAssessment] {
        &self.rows
    }

    pub fn row(&self, criterion_id: &str) -> Option<&ReviewerAssessment> {
        self.rows.iter().find(|r| r.criterion_id == criterion_id)
    }

    pub fn attendance_row(&self) -> Option<&ReviewerAssessment> {
        self.rows.iter().find(|r| r.is_attendance_auto_suggested)
    }

    fn row_mut(&mut self, criterion_id: &str) -> Result<&mut ReviewerAssessment, ValidationError> {
        self.rows
            .iter_mut()
            .find(|r| r.criterion_id == criterion_id)
            .ok_or_else(|| ValidationError::UnknownCriterion {
                criterion_id: criterion_id.to_string(),
            })
    }

    /// Set a reviewer score. On the attendance row the adjusted flag tracks
    /// whether the score still equals the suggestion.
    pub fn set_score(&mut self, criterion_id: &str, score: f64) -> Result<(), ValidationError> {
        let suggestion = self.attendance_suggestion;
        let row = self.row_mut(criterion_id)?;
        if !is_valid_score(score) {
            return Err(ValidationError::ScoreOutOfRange {
                name: row.criterion_name.clone(),
                score,
            });
        }
        row.reviewer_score = score;
        if row.is_attendance_auto_suggested {
            row.attendance_adjusted = suggestion.is_some_and(|s| differs(score, s));
        }
        Ok(())
    }

    pub fn set_comment(
        &mut self,
        criterion_id: &str,
        comments: impl Into<String>,
    ) -> Result<(), ValidationError> {
        self.row_mut(criterion_id)?.reviewer_comments = comments.into();
        Ok(())
    }

    pub fn into_assessments(self) -> Vec<ReviewerAssessment> {
        self.rows
    }
}

/// Gate for Submitted → Reviewed
///
/// Rows must cover exactly the self-assessed criteria with scores in range.
/// An attendance score that differs from the suggestion must be flagged as
/// adjusted and carry a non-empty comment.
pub fn validate_review(
    appraisal: &Appraisal,
    criteria: &[Criterion],
    rows: &[ReviewerAssessment],
) -> Result<(), ValidationError> {
    for sa in &appraisal.self_assessments {
        let matching = rows
            .iter()
            .filter(|r| r.criterion_id == sa.criterion_id)
            .count();
        if matching == 0 {
            return Err(ValidationError::ReviewRowMissing {
                criterion_id: sa.criterion_id.clone(),
            });
        }
        if matching > 1 {
            return Err(ValidationError::ReviewRowUnexpected {
                criterion_id: sa.criterion_id.clone(),
            });
        }
    }

    for row in rows {
        if !appraisal
            .self_assessments
            .iter()
            .any(|sa| sa.criterion_id == row.criterion_id)
        {
            return Err(ValidationError::ReviewRowUnexpected {
                criterion_id: row.criterion_id.clone(),
            });
        }
        if !is_valid_score(row.reviewer_score) {
            return Err(ValidationError::ScoreOutOfRange {
                name: row.criterion_name.clone(),
                score: row.reviewer_score,
            });
        }
    }

    let attendance_id = criteria.iter().find(|c| c.is_attendance()).map(|c| &c.id);
    let (Some(attendance_id), Some(suggested)) = (attendance_id, appraisal.attendance_suggestion())
    else {
        return Ok(());
    };

    if let Some(row) = rows.iter().find(|r| &r.criterion_id == attendance_id) {
        if differs(row.reviewer_score, suggested) {
            if row.reviewer_comments.trim().is_empty() {
                return Err(ValidationError::AttendanceCommentRequired);
            }
            if !row.attendance_adjusted {
                return Err(ValidationError::AttendanceAdjustmentUnflagged { suggested });
            }
        }
    }

    Ok(())
}

/// HR's finalization decision
#[derive(Debug, Clone, PartialEq)]
pub struct FinalDecision {
    pub final_score: f64,
    pub category: PerformanceCategory,
    pub recommendations: String,
}

/// Optional HR edits to the finalization defaults
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinalizeOverrides {
    pub final_score: Option<f64>,
    pub category: Option<PerformanceCategory>,
    pub recommendations: Option<String>,
}

impl FinalizeOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.final_score = Some(score);
        self
    }

    pub fn with_category(mut self, category: PerformanceCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_recommendations(mut self, text: impl Into<String>) -> Self {
        self.recommendations = Some(text.into());
        self
    }
}

impl FinalDecision {
    /// Apply HR edits. An edited score without an explicit category
    /// re-derives the category from the new score.
    pub fn apply(self, overrides: FinalizeOverrides) -> Self {
        let final_score = overrides.final_score.unwrap_or(self.final_score);
        let category = match (overrides.category, overrides.final_score) {
            (Some(category), _) => category,
            (None, Some(score)) => PerformanceCategory::from_score(score),
            (None, None) => self.category,
        };
        Self {
            final_score,
            category,
            recommendations: overrides.recommendations.unwrap_or(self.recommendations),
        }
    }
}

/// Default decision: mean reviewer score to one decimal and its category
pub fn finalize_defaults(appraisal: &Appraisal) -> FinalDecision {
    let final_score = round1(appraisal.average_reviewer_score());
    FinalDecision {
        final_score,
        category: PerformanceCategory::from_score(final_score),
        recommendations: String::new(),
    }
}
