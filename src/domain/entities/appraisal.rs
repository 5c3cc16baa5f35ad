//! Appraisal entity - the per-employee, per-cycle evaluation record
//!
//! Owns the workflow state machine:
//!
//! ```text
//! Not Started → Self Assessment → Submitted → Reviewed → Completed
//! ```
//!
//! Every transition checks its source status and leaves the record untouched
//! when it fails. Annual records produced by the rollup are born Completed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::services::score_contributions;
use crate::domain::value_objects::{
    is_valid_score, mean, AppraisalStatus, AttendanceSummary, EmployeeRef, PerformanceCategory,
};
use crate::error::{AppraisalError, AppraisalResult, ValidationError};

use super::contribution::{
    next_entry_id, AdminContribution, NewAdminContribution, NewResearchEntry, ResearchEntry,
};
use super::criterion::{Criterion, CriterionKind};
use super::cycle::Cycle;

/// Scores computed from other subsystems at creation time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemScores {
    pub student_feedback: f64,
    /// Suggested attendance score, always within 1..=10
    pub attendance: u8,
}

/// Contribution scorer output, kept as the audit trail for suggested scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionScores {
    pub research: f64,
    pub admin: f64,
    pub reasoning: String,
}

/// Employee-entered score for a custom criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomScore {
    pub criterion_id: String,
    pub score: f64,
    #[serde(default)]
    pub comments: String,
}

/// Frozen self-assessment row, one per criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfAssessment {
    pub criterion_id: String,
    pub criterion_name: String,
    pub self_score: f64,
    #[serde(default)]
    pub comments: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewerAssessment {
    pub criterion_id: String,
    pub criterion_name: String,
    pub self_score: f64,
    pub reviewer_score: f64,
    #[serde(default)]
    pub reviewer_comments: String,
    #[serde(default)]
    pub is_attendance_auto_suggested: bool,
    #[serde(default)]
    pub attendance_adjusted: bool,
}

/// Narrative produced by the insight synthesizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppraisalInsights {
    pub overall_summary: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub training_suggestions: Vec<String>,
    pub attendance_impact: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timestamps {
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appraisal {
    pub id: String,
    pub cycle_id: String,
    pub employee: EmployeeRef,
    pub status: AppraisalStatus,
    #[serde(default)]
    pub research_entries: Vec<ResearchEntry>,
    #[serde(default)]
    pub admin_contributions: Vec<AdminContribution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contribution_scores: Option<ContributionScores>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_scores: Option<SystemScores>,
    #[serde(default)]
    pub custom_scores: Vec<CustomScore>,
    #[serde(default)]
    pub self_assessments: Vec<SelfAssessment>,
    #[serde(default)]
    pub reviewer_assessments: Vec<ReviewerAssessment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_id: Option<String>,
    pub timestamps: Timestamps,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<AppraisalInsights>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<PerformanceCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance_summary: Option<AttendanceSummary>,
}

impl Appraisal {
    /// Stable id for an (employee, cycle) pair
    pub fn id_for(employee_id: &str, cycle_id: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(employee_id.as_bytes());
        hasher.update([0u8]);
        hasher.update(cycle_id.as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        format!("apr-{}", &digest[..12])
    }

    /// Create a record in Self Assessment with its system scores initialized
    pub fn start(
        cycle: &Cycle,
        employee: EmployeeRef,
        system_scores: SystemScores,
        attendance_summary: Option<AttendanceSummary>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut appraisal = Self {
            id: Self::id_for(&employee.id, &cycle.id),
            cycle_id: cycle.id.clone(),
            employee,
            status: AppraisalStatus::NotStarted,
            research_entries: Vec::new(),
            admin_contributions: Vec::new(),
            contribution_scores: None,
            system_scores: Some(system_scores),
            custom_scores: Vec::new(),
            self_assessments: Vec::new(),
            reviewer_assessments: Vec::new(),
            reviewer_id: None,
            timestamps: Timestamps {
                created_at: now,
                submitted_at: None,
                reviewed_at: None,
                completed_at: None,
            },
            insights: None,
            final_score: None,
            category: None,
            recommendations: None,
            attendance_summary,
        };
        appraisal.refresh_contribution_scores();
        appraisal.status = AppraisalStatus::SelfAssessment;
        appraisal
    }

    /// Completed annual summary record built by the rollup
    #[allow(clippy::too_many_arguments)]
    pub fn annual(
        cycle: &Cycle,
        employee: EmployeeRef,
        reviewer_assessments: Vec<ReviewerAssessment>,
        insights: AppraisalInsights,
        final_score: f64,
        category: PerformanceCategory,
        attendance_summary: Option<AttendanceSummary>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Self::id_for(&employee.id, &cycle.id),
            cycle_id: cycle.id.clone(),
            employee,
            status: AppraisalStatus::Completed,
            research_entries: Vec::new(),
            admin_contributions: Vec::new(),
            contribution_scores: None,
            system_scores: None,
            custom_scores: Vec::new(),
            self_assessments: Vec::new(),
            reviewer_assessments,
            reviewer_id: None,
            timestamps: Timestamps {
                created_at: completed_at,
                submitted_at: None,
                reviewed_at: None,
                completed_at: Some(completed_at),
            },
            insights: Some(insights),
            final_score: Some(final_score),
            category: Some(category),
            recommendations: None,
            attendance_summary,
        }
    }

    pub fn ensure_status(
        &self,
        expected: AppraisalStatus,
        action: &'static str,
    ) -> AppraisalResult<()> {
        if self.status != expected {
            return Err(AppraisalError::InvalidTransition {
                id: self.id.clone(),
                action,
                actual: self.status,
                expected,
            });
        }
        Ok(())
    }

    fn ensure_editable(&self) -> AppraisalResult<()> {
        if self.status.is_editable() {
            return Ok(());
        }
        Err(AppraisalError::InvalidTransition {
            id: self.id.clone(),
            action: "edit",
            actual: self.status,
            expected: AppraisalStatus::SelfAssessment,
        })
    }

    fn advance(&mut self, target: AppraisalStatus) {
        debug_assert!(self.status.can_advance_to(target));
        self.status = target;
    }

    /// Suggested attendance score, or None when system scores are missing
    pub fn attendance_suggestion(&self) -> Option<f64> {
        self.system_scores.map(|s| f64::from(s.attendance))
    }

    /// Unweighted mean of reviewer scores; 0 when there are none
    pub fn average_reviewer_score(&self) -> f64 {
        mean(self.reviewer_assessments.iter().map(|a| a.reviewer_score))
    }

    pub fn custom_score(&self, criterion_id: &str) -> Option<&CustomScore> {
        self.custom_scores
            .iter()
            .find(|c| c.criterion_id == criterion_id)
    }

    pub fn add_research_entry(
        &mut self,
        entry: NewResearchEntry,
        now: DateTime<Utc>,
    ) -> AppraisalResult<String> {
        self.ensure_editable()?;
        if entry.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        let id = next_entry_id("RE", self.research_entries.iter().map(|e| e.id.as_str()));
        self.research_entries.push(ResearchEntry {
            id: id.clone(),
            title: entry.title,
            description: entry.description,
            kind: entry.kind,
            attached_document_refs: entry.attached_document_refs,
            submitted_at: now,
        });
        self.refresh_contribution_scores();
        Ok(id)
    }

    pub fn remove_research_entry(&mut self, entry_id: &str) -> AppraisalResult<()> {
        self.ensure_editable()?;
        let before = self.research_entries.len();
        self.research_entries.retain(|e| e.id != entry_id);
        if self.research_entries.len() == before {
            return Err(ValidationError::EntryNotFound {
                kind: "research",
                id: entry_id.to_string(),
            }
            .into());
        }
        self.refresh_contribution_scores();
        Ok(())
    }

    pub fn add_admin_contribution(
        &mut self,
        contribution: NewAdminContribution,
        now: DateTime<Utc>,
    ) -> AppraisalResult<String> {
        self.ensure_editable()?;
        if contribution.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        let id = next_entry_id(
            "AC",
            self.admin_contributions.iter().map(|c| c.id.as_str()),
        );
        self.admin_contributions.push(AdminContribution {
            id: id.clone(),
            title: contribution.title,
            description: contribution.description,
            category: contribution.category,
            submitted_at: now,
        });
        self.refresh_contribution_scores();
        Ok(id)
    }

    pub fn remove_admin_contribution(&mut self, contribution_id: &str) -> AppraisalResult<()> {
        self.ensure_editable()?;
        let before = self.admin_contributions.len();
        self.admin_contributions.retain(|c| c.id != contribution_id);
        if self.admin_contributions.len() == before {
            return Err(ValidationError::EntryNotFound {
                kind: "administrative",
                id: contribution_id.to_string(),
            }
            .into());
        }
        self.refresh_contribution_scores();
        Ok(())
    }

    /// Record the employee's own score for a custom criterion
    pub fn set_custom_score(
        &mut self,
        criterion: &Criterion,
        score: f64,
        comments: impl Into<String>,
    ) -> AppraisalResult<()> {
        self.ensure_editable()?;
        if criterion.kind != CriterionKind::Custom {
            return Err(ValidationError::NotSelfScorable {
                name: criterion.name.clone(),
            }
            .into());
        }
        if !is_valid_score(score) {
            return Err(ValidationError::ScoreOutOfRange {
                name: criterion.name.clone(),
                score,
            }
            .into());
        }

        let entry = CustomScore {
            criterion_id: criterion.id.clone(),
            score,
            comments: comments.into(),
        };
        match self
            .custom_scores
            .iter_mut()
            .find(|c| c.criterion_id == criterion.id)
        {
            Some(existing) => *existing = entry,
            None => self.custom_scores.push(entry),
        }
        Ok(())
    }

    /// Persisted contribution scores always reflect the current entries
    fn refresh_contribution_scores(&mut self) {
        self.contribution_scores = Some(score_contributions(
            &self.research_entries,
            &self.admin_contributions,
        ));
    }

    /// Self Assessment → Submitted, freezing the self-assessment rows
    pub fn submit(
        &mut self,
        self_assessments: Vec<SelfAssessment>,
        now: DateTime<Utc>,
    ) -> AppraisalResult<()> {
        self.ensure_status(AppraisalStatus::SelfAssessment, "submit")?;
        if self.system_scores.is_none() {
            return Err(ValidationError::MissingSystemScores.into());
        }
        self.self_assessments = self_assessments;
        self.timestamps.submitted_at = Some(now);
        self.advance(AppraisalStatus::Submitted);
        Ok(())
    }

    /// Submitted → Reviewed. Callers validate the assessments first.
    pub fn record_review(
        &mut self,
        reviewer_id: impl Into<String>,
        assessments: Vec<ReviewerAssessment>,
        insights: AppraisalInsights,
        now: DateTime<Utc>,
    ) -> AppraisalResult<()> {
        self.ensure_status(AppraisalStatus::Submitted, "review")?;
        self.reviewer_assessments = assessments;
        self.reviewer_id = Some(reviewer_id.into());
        self.insights = Some(insights);
        self.timestamps.reviewed_at = Some(now);
        self.advance(AppraisalStatus::Reviewed);
        Ok(())
    }

    /// Reviewed → Completed with the HR decision
    pub fn finalize(
        &mut self,
        final_score: f64,
        category: PerformanceCategory,
        recommendations: impl Into<String>,
        now: DateTime<Utc>,
    ) -> AppraisalResult<()> {
        self.ensure_status(AppraisalStatus::Reviewed, "finalize")?;
        if !is_valid_score(final_score) {
            return Err(ValidationError::ScoreOutOfRange {
                name: "final score".to_string(),
                score: final_score,
            }
            .into());
        }
        self.final_score = Some(final_score);
        self.category = Some(category);
        self.recommendations = Some(recommendations.into());
        self.timestamps.completed_at = Some(now);
        self.advance(AppraisalStatus::Completed);
        Ok(())
    }
}
