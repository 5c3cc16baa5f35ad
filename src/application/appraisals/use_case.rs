//! Appraisal Use Case
//!
//! Drives one appraisal through the workflow:
//!
//! ```text
//! create → edit entries / self scores → submit → review → finalize
//! ```
//!
//! Each call authorizes the actor, applies one domain transition, writes
//! the collection once and emits one audit event.

use tracing::{debug, info};

use crate::domain::entities::{
    Appraisal, ContributionScores, Cycle, NewAdminContribution, NewResearchEntry,
    ReviewerAssessment, SystemScores,
};
use crate::domain::policies::Action;
use crate::domain::ports::{AuditAction, EntityStore};
use crate::domain::services::{
    build_self_assessments, finalize_defaults, score_contributions, suggest_attendance_score,
    synthesize_insights, validate_review, FinalDecision, FinalizeOverrides, ReviewDraft,
};
use crate::domain::value_objects::{is_valid_score, round1, AppraisalStatus, Identity};
use crate::error::{AppraisalResult, ValidationError};

use super::options::AppraisalFilter;
use crate::application::context::WorkflowContext;
use crate::application::records::Records;

pub struct AppraisalUseCase<S: EntityStore> {
    records: Records<S>,
    context: WorkflowContext,
}

impl<S: EntityStore> AppraisalUseCase<S> {
    pub fn new(store: S, context: WorkflowContext) -> Self {
        Self {
            records: Records::new(store),
            context,
        }
    }

    /// Start the actor's appraisal for an active monthly cycle
    ///
    /// System scores are initialized from the fact sources; missing facts
    /// fall back to the configured defaults.
    pub fn create_appraisal(&self, actor: &Identity, cycle_id: &str) -> AppraisalResult<Appraisal> {
        self.context
            .authorize(actor, Action::SelfAssess { owner_id: &actor.id })?;
        let cycle = self.records.cycle(cycle_id)?;
        if !cycle.is_monthly() {
            return Err(ValidationError::CycleNotMonthly {
                cycle_id: cycle.id.clone(),
            }
            .into());
        }
        if !cycle.accepts_appraisals() {
            return Err(ValidationError::CycleNotActive {
                cycle_id: cycle.id.clone(),
            }
            .into());
        }

        let mut all = self.records.appraisals()?;
        if all
            .iter()
            .any(|a| a.cycle_id == cycle.id && a.employee.id == actor.id)
        {
            return Err(ValidationError::DuplicateAppraisal {
                employee_id: actor.id.clone(),
                cycle_id: cycle.id.clone(),
            }
            .into());
        }

        let attendance = self
            .context
            .attendance()
            .attendance_summary(&actor.id, &cycle.period);
        let system_scores = SystemScores {
            student_feedback: self.student_feedback(&actor.id, &cycle),
            attendance: suggest_attendance_score(attendance.as_ref()),
        };
        let appraisal = Appraisal::start(
            &cycle,
            actor.employee_ref(),
            system_scores,
            attendance,
            self.context.clock().now(),
        );
        all.push(appraisal.clone());
        self.records.save_appraisals(&all)?;

        self.context.emit(
            AuditAction::AppraisalCreated,
            actor,
            format!("{} started for {}", appraisal.id, cycle.name),
        );
        Ok(appraisal)
    }

    fn student_feedback(&self, employee_id: &str, cycle: &Cycle) -> f64 {
        let feedback = self
            .context
            .feedback()
            .student_feedback(employee_id, &cycle.id)
            .filter(|s| is_valid_score(*s));
        match feedback {
            Some(score) => round1(score),
            None => {
                debug!(employee = employee_id, cycle = %cycle.id, "no student feedback, using default");
                self.context.default_student_feedback()
            }
        }
    }

    /// Authorize and apply an owner edit, then persist
    fn edit<T>(
        &self,
        actor: &Identity,
        appraisal_id: &str,
        change: impl FnOnce(&mut Appraisal) -> AppraisalResult<T>,
    ) -> AppraisalResult<(Appraisal, T)> {
        let context = &self.context;
        self.records.update_appraisal(appraisal_id, |appraisal| {
            context.authorize(
                actor,
                Action::SelfAssess {
                    owner_id: &appraisal.employee.id,
                },
            )?;
            change(appraisal)
        })
    }

    /// Add a research entry; returns the updated record and the new entry id
    pub fn add_research_entry(
        &self,
        actor: &Identity,
        appraisal_id: &str,
        entry: NewResearchEntry,
    ) -> AppraisalResult<(Appraisal, String)> {
        let now = self.context.clock().now();
        let (appraisal, id) =
            self.edit(actor, appraisal_id, |a| a.add_research_entry(entry, now))?;
        self.context.emit(
            AuditAction::ResearchEntryAdded,
            actor,
            format!("{} added to {}", id, appraisal.id),
        );
        Ok((appraisal, id))
    }

    pub fn remove_research_entry(
        &self,
        actor: &Identity,
        appraisal_id: &str,
        entry_id: &str,
    ) -> AppraisalResult<Appraisal> {
        let (appraisal, ()) =
            self.edit(actor, appraisal_id, |a| a.remove_research_entry(entry_id))?;
        self.context.emit(
            AuditAction::ResearchEntryRemoved,
            actor,
            format!("{} removed from {}", entry_id, appraisal.id),
        );
        Ok(appraisal)
    }

    pub fn add_admin_contribution(
        &self,
        actor: &Identity,
        appraisal_id: &str,
        contribution: NewAdminContribution,
    ) -> AppraisalResult<(Appraisal, String)> {
        let now = self.context.clock().now();
        let (appraisal, id) = self.edit(actor, appraisal_id, |a| {
            a.add_admin_contribution(contribution, now)
        })?;
        self.context.emit(
            AuditAction::AdminContributionAdded,
            actor,
            format!("{} added to {}", id, appraisal.id),
        );
        Ok((appraisal, id))
    }

    pub fn remove_admin_contribution(
        &self,
        actor: &Identity,
        appraisal_id: &str,
        contribution_id: &str,
    ) -> AppraisalResult<Appraisal> {
        let (appraisal, ()) = self.edit(actor, appraisal_id, |a| {
            a.remove_admin_contribution(contribution_id)
        })?;
        self.context.emit(
            AuditAction::AdminContributionRemoved,
            actor,
            format!("{} removed from {}", contribution_id, appraisal.id),
        );
        Ok(appraisal)
    }

    /// Record the employee's score for a custom criterion
    pub fn set_self_score(
        &self,
        actor: &Identity,
        appraisal_id: &str,
        criterion_id: &str,
        score: f64,
        comments: &str,
    ) -> AppraisalResult<Appraisal> {
        let cycle = self.cycle_of(appraisal_id)?;
        let criterion = cycle
            .criterion(criterion_id)
            .ok_or_else(|| ValidationError::UnknownCriterion {
                criterion_id: criterion_id.to_string(),
            })?;
        let (appraisal, ()) = self.edit(actor, appraisal_id, |a| {
            a.set_custom_score(criterion, score, comments)
        })?;
        self.context.emit(
            AuditAction::SelfScoreRecorded,
            actor,
            format!("{} scored {:.1} on {}", appraisal.id, score, criterion.name),
        );
        Ok(appraisal)
    }

    fn cycle_of(&self, appraisal_id: &str) -> AppraisalResult<Cycle> {
        let appraisal = self.records.appraisal(appraisal_id)?;
        self.records.cycle(&appraisal.cycle_id)
    }

    /// Suggested research/admin scores for the current entries; read-only
    pub fn preview_contribution_scores(
        &self,
        actor: &Identity,
        appraisal_id: &str,
    ) -> AppraisalResult<ContributionScores> {
        let appraisal = self.get_appraisal(actor, appraisal_id)?;
        Ok(score_contributions(
            &appraisal.research_entries,
            &appraisal.admin_contributions,
        ))
    }

    /// Self Assessment → Submitted
    pub fn submit_appraisal(&self, actor: &Identity, appraisal_id: &str) -> AppraisalResult<Appraisal> {
        let cycle = self.cycle_of(appraisal_id)?;
        let now = self.context.clock().now();
        let (appraisal, ()) = self.edit(actor, appraisal_id, |a| {
            a.ensure_status(AppraisalStatus::SelfAssessment, "submit")?;
            let rows = build_self_assessments(&cycle.criteria, a)?;
            a.submit(rows, now)
        })?;
        self.context.emit(
            AuditAction::AppraisalSubmitted,
            actor,
            format!(
                "{} submitted with {} self assessment(s)",
                appraisal.id,
                appraisal.self_assessments.len()
            ),
        );
        Ok(appraisal)
    }

    /// Reviewer's working copy for a Submitted appraisal; nothing is persisted
    pub fn start_review(&self, actor: &Identity, appraisal_id: &str) -> AppraisalResult<ReviewDraft> {
        let appraisal = self.records.appraisal(appraisal_id)?;
        self.context.authorize(
            actor,
            Action::Review {
                owner_id: &appraisal.employee.id,
            },
        )?;
        appraisal.ensure_status(AppraisalStatus::Submitted, "review")?;
        let cycle = self.records.cycle(&appraisal.cycle_id)?;
        Ok(ReviewDraft::seed(&appraisal, &cycle.criteria))
    }

    /// Submitted → Reviewed from a working copy
    pub fn submit_review(&self, actor: &Identity, draft: ReviewDraft) -> AppraisalResult<Appraisal> {
        let appraisal_id = draft.appraisal_id().to_string();
        self.submit_review_rows(actor, &appraisal_id, draft.into_assessments())
    }

    /// Submitted → Reviewed from explicit rows
    ///
    /// Rows are validated against the attendance override rule, then the
    /// insights are synthesized and stored with them.
    pub fn submit_review_rows(
        &self,
        actor: &Identity,
        appraisal_id: &str,
        rows: Vec<ReviewerAssessment>,
    ) -> AppraisalResult<Appraisal> {
        let cycle = self.cycle_of(appraisal_id)?;
        let now = self.context.clock().now();
        let context = &self.context;
        let (appraisal, ()) = self.records.update_appraisal(appraisal_id, |a| {
            context.authorize(
                actor,
                Action::Review {
                    owner_id: &a.employee.id,
                },
            )?;
            a.ensure_status(AppraisalStatus::Submitted, "review")?;
            validate_review(a, &cycle.criteria, &rows)?;
            let insights = synthesize_insights(&rows, a.attendance_summary.as_ref());
            a.record_review(actor.id.clone(), rows, insights, now)
        })?;
        self.context.emit(
            AuditAction::ReviewSubmitted,
            actor,
            format!(
                "{} reviewed, average {:.1}/10",
                appraisal.id,
                appraisal.average_reviewer_score()
            ),
        );
        Ok(appraisal)
    }

    /// Editable HR defaults for a Reviewed appraisal; nothing is persisted
    pub fn finalize_defaults(&self, actor: &Identity, appraisal_id: &str) -> AppraisalResult<FinalDecision> {
        let appraisal = self.records.appraisal(appraisal_id)?;
        self.context.authorize(
            actor,
            Action::Finalize {
                owner_id: &appraisal.employee.id,
            },
        )?;
        appraisal.ensure_status(AppraisalStatus::Reviewed, "finalize")?;
        Ok(finalize_defaults(&appraisal))
    }

    /// Reviewed → Completed with the defaults plus any HR edits
    pub fn finalize_appraisal(
        &self,
        actor: &Identity,
        appraisal_id: &str,
        overrides: FinalizeOverrides,
    ) -> AppraisalResult<Appraisal> {
        let now = self.context.clock().now();
        let context = &self.context;
        let (appraisal, decision) = self.records.update_appraisal(appraisal_id, |a| {
            context.authorize(
                actor,
                Action::Finalize {
                    owner_id: &a.employee.id,
                },
            )?;
            a.ensure_status(AppraisalStatus::Reviewed, "finalize")?;
            let decision = finalize_defaults(a).apply(overrides);
            a.finalize(
                decision.final_score,
                decision.category,
                decision.recommendations.clone(),
                now,
            )?;
            Ok(decision)
        })?;
        info!(appraisal = %appraisal.id, score = decision.final_score, category = %decision.category, "finalized");
        self.context.emit(
            AuditAction::AppraisalFinalized,
            actor,
            format!(
                "{} completed: {:.1}/10 ({})",
                appraisal.id, decision.final_score, decision.category
            ),
        );
        Ok(appraisal)
    }

    pub fn get_appraisal(&self, actor: &Identity, appraisal_id: &str) -> AppraisalResult<Appraisal> {
        let appraisal = self.records.appraisal(appraisal_id)?;
        self.context.authorize(
            actor,
            Action::View {
                owner_id: &appraisal.employee.id,
            },
        )?;
        Ok(appraisal)
    }

    /// Appraisals matching the filter. Non-admins only ever see their own.
    pub fn list_appraisals(
        &self,
        actor: &Identity,
        filter: &AppraisalFilter,
    ) -> AppraisalResult<Vec<Appraisal>> {
        let mut appraisals: Vec<Appraisal> = self
            .records
            .appraisals()?
            .into_iter()
            .filter(|a| filter.matches(a))
            .filter(|a| actor.is_admin() || a.employee.id == actor.id)
            .collect();
        appraisals.sort_by(|a, b| {
            (&a.cycle_id, &a.employee.id).cmp(&(&b.cycle_id, &b.employee.id))
        });
        Ok(appraisals)
    }
}
