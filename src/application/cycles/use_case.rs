//! Cycle Use Case
//!
//! Admin authoring of monthly cycles and the employee-facing
//! "available months" query.

use tracing::debug;

use crate::domain::entities::{Criterion, Cycle};
use crate::domain::policies::Action;
use crate::domain::ports::{AuditAction, EntityStore};
use crate::domain::value_objects::Identity;
use crate::error::{AppraisalResult, ValidationError};

use super::options::{CycleFilter, NewCycle};
use crate::application::context::WorkflowContext;
use crate::application::records::Records;

pub struct CycleUseCase<S: EntityStore> {
    records: Records<S>,
    context: WorkflowContext,
}

impl<S: EntityStore> CycleUseCase<S> {
    pub fn new(store: S, context: WorkflowContext) -> Self {
        Self {
            records: Records::new(store),
            context,
        }
    }

    /// Author a monthly cycle in Draft (or Active when requested)
    pub fn create_cycle(&self, actor: &Identity, input: NewCycle) -> AppraisalResult<Cycle> {
        self.context.authorize(actor, Action::AuthorCycle)?;

        let id = Cycle::monthly_id(input.year, input.month);
        let name = input
            .name
            .clone()
            .unwrap_or_else(|| Cycle::month_name(input.year, input.month));
        let mut cycle = Cycle::monthly(
            id,
            name,
            input.year,
            input.month,
            input.period,
            input.criteria,
        )?;

        let mut all = self.records.cycles()?;
        if all.iter().any(|c| c.id == cycle.id) {
            return Err(ValidationError::DuplicateCycle { id: cycle.id }.into());
        }
        if input.activate {
            cycle.activate()?;
        }
        all.push(cycle.clone());
        self.records.save_cycles(&all)?;

        self.context.emit(
            AuditAction::CycleCreated,
            actor,
            format!("{} ({}) created as {}", cycle.name, cycle.id, cycle.status),
        );
        Ok(cycle)
    }

    /// Replace the criteria of a Draft cycle
    pub fn update_criteria(
        &self,
        actor: &Identity,
        cycle_id: &str,
        criteria: Vec<Criterion>,
    ) -> AppraisalResult<Cycle> {
        self.context.authorize(actor, Action::AuthorCycle)?;
        let cycle = self
            .records
            .update_cycle(cycle_id, |c| c.replace_criteria(criteria))?;
        self.context.emit(
            AuditAction::CycleCriteriaUpdated,
            actor,
            format!("{} criteria updated ({} criteria)", cycle.id, cycle.criteria.len()),
        );
        Ok(cycle)
    }

    pub fn activate_cycle(&self, actor: &Identity, cycle_id: &str) -> AppraisalResult<Cycle> {
        self.context.authorize(actor, Action::AuthorCycle)?;
        let cycle = self.records.update_cycle(cycle_id, Cycle::activate)?;
        self.context.emit(
            AuditAction::CycleActivated,
            actor,
            format!("{} activated", cycle.id),
        );
        Ok(cycle)
    }

    pub fn complete_cycle(&self, actor: &Identity, cycle_id: &str) -> AppraisalResult<Cycle> {
        self.context.authorize(actor, Action::AuthorCycle)?;
        let cycle = self.records.update_cycle(cycle_id, Cycle::complete)?;
        self.context.emit(
            AuditAction::CycleCompleted,
            actor,
            format!("{} completed", cycle.id),
        );
        Ok(cycle)
    }

    pub fn get_cycle(&self, cycle_id: &str) -> AppraisalResult<Cycle> {
        self.records.cycle(cycle_id)
    }

    /// Cycles ordered by year then month; annual cycles sort after monthly
    pub fn list_cycles(&self, filter: &CycleFilter) -> AppraisalResult<Vec<Cycle>> {
        let mut cycles: Vec<Cycle> = self
            .records
            .cycles()?
            .into_iter()
            .filter(|c| filter.matches(c.kind, c.status, c.year))
            .collect();
        cycles.sort_by(|a, b| {
            (a.year, a.month_ordinal.unwrap_or(13), &a.id).cmp(&(
                b.year,
                b.month_ordinal.unwrap_or(13),
                &b.id,
            ))
        });
        Ok(cycles)
    }

    /// Active monthly cycles the employee has not started an appraisal for
    pub fn available_cycles(&self, employee_id: &str) -> AppraisalResult<Vec<Cycle>> {
        let appraisals = self.records.appraisals()?;
        let available: Vec<Cycle> = self
            .list_cycles(&CycleFilter::default())?
            .into_iter()
            .filter(|c| c.accepts_appraisals())
            .filter(|c| {
                !appraisals
                    .iter()
                    .any(|a| a.cycle_id == c.id && a.employee.id == employee_id)
            })
            .collect();
        debug!(employee = employee_id, count = available.len(), "available cycles");
        Ok(available)
    }
}
