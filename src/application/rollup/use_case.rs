//! Rollup Use Case
//!
//! Generates (or regenerates) annual summary records. Monthly records are
//! only read; the annual cycle and appraisal are upserted by id, so running
//! the rollup again over the same inputs rewrites identical records.

use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::domain::entities::{Appraisal, Cycle};
use crate::domain::policies::Action;
use crate::domain::ports::{AuditAction, EntityStore};
use crate::domain::services::{eligible_months, roll_up, AnnualRollup};
use crate::domain::value_objects::{AppraisalStatus, Identity};
use crate::error::{AppraisalResult, ValidationError};

use crate::application::context::WorkflowContext;
use crate::application::records::Records;

pub struct RollupUseCase<S: EntityStore> {
    records: Records<S>,
    context: WorkflowContext,
}

impl<S: EntityStore> RollupUseCase<S> {
    pub fn new(store: S, context: WorkflowContext) -> Self {
        Self {
            records: Records::new(store),
            context,
        }
    }

    /// Annual record for one employee and year
    pub fn roll_up_employee(
        &self,
        actor: &Identity,
        employee_id: &str,
        year: i32,
    ) -> AppraisalResult<AnnualRollup> {
        self.context.authorize(actor, Action::RollUp)?;
        let mut cycles = self.records.cycles()?;
        let mut appraisals = self.records.appraisals()?;

        let rollup = build(&cycles, &appraisals, employee_id, year)?;
        let loaded_cycles = cycles.clone();
        upsert(&mut cycles, &mut appraisals, &rollup);
        self.persist(&loaded_cycles, &cycles, &appraisals)?;

        self.announce(actor, &rollup);
        Ok(rollup)
    }

    /// Annual records for every employee with completed months in the year
    pub fn roll_up_year(&self, actor: &Identity, year: i32) -> AppraisalResult<Vec<AnnualRollup>> {
        self.context.authorize(actor, Action::RollUp)?;
        let mut cycles = self.records.cycles()?;
        let mut appraisals = self.records.appraisals()?;

        let employees: BTreeSet<String> = appraisals
            .iter()
            .filter(|a| a.status == AppraisalStatus::Completed)
            .filter(|a| {
                cycles
                    .iter()
                    .any(|c| c.id == a.cycle_id && c.is_monthly() && c.year == year)
            })
            .map(|a| a.employee.id.clone())
            .collect();

        let mut rollups = Vec::with_capacity(employees.len());
        for employee_id in &employees {
            rollups.push(build(&cycles, &appraisals, employee_id, year)?);
        }
        if !rollups.is_empty() {
            let loaded_cycles = cycles.clone();
            for rollup in &rollups {
                upsert(&mut cycles, &mut appraisals, rollup);
            }
            self.persist(&loaded_cycles, &cycles, &appraisals)?;
        }

        for rollup in &rollups {
            self.announce(actor, rollup);
        }
        info!(year, count = rollups.len(), "annual rollup finished");
        Ok(rollups)
    }

    /// Cycles first, then appraisals. A failed appraisal write puts the loaded
    /// cycles back so no annual cycle outlives a failed rollup.
    fn persist(
        &self,
        loaded_cycles: &[Cycle],
        cycles: &[Cycle],
        appraisals: &[Appraisal],
    ) -> AppraisalResult<()> {
        self.records.save_cycles(cycles)?;
        if let Err(err) = self.records.save_appraisals(appraisals) {
            if let Err(restore) = self.records.save_cycles(loaded_cycles) {
                warn!(error = %restore, "failed to restore cycles after a failed rollup write");
            }
            return Err(err);
        }
        Ok(())
    }

    fn announce(&self, actor: &Identity, rollup: &AnnualRollup) {
        let annual = &rollup.appraisal;
        self.context.emit(
            AuditAction::AnnualAppraisalGenerated,
            actor,
            format!(
                "{} for {}: {:.1}/10",
                rollup.cycle.id,
                annual.employee.name,
                annual.final_score.unwrap_or_default()
            ),
        );
    }
}

fn build(
    cycles: &[Cycle],
    appraisals: &[Appraisal],
    employee_id: &str,
    year: i32,
) -> AppraisalResult<AnnualRollup> {
    let pairs: Vec<(&Cycle, &Appraisal)> = appraisals
        .iter()
        .filter_map(|a| cycles.iter().find(|c| c.id == a.cycle_id).map(|c| (c, a)))
        .collect();
    let months = eligible_months(employee_id, year, pairs);

    // Latest month carries the most recent employee snapshot
    let employee = months
        .last()
        .map(|(_, a)| a.employee.clone())
        .ok_or_else(|| ValidationError::NothingToRollUp {
            employee_id: employee_id.to_string(),
            year,
        })?;
    Ok(roll_up(employee, year, months)?)
}

fn upsert(cycles: &mut Vec<Cycle>, appraisals: &mut Vec<Appraisal>, rollup: &AnnualRollup) {
    match cycles.iter_mut().find(|c| c.id == rollup.cycle.id) {
        Some(existing) => *existing = rollup.cycle.clone(),
        None => cycles.push(rollup.cycle.clone()),
    }
    match appraisals.iter_mut().find(|a| a.id == rollup.appraisal.id) {
        Some(existing) => *existing = rollup.appraisal.clone(),
        None => appraisals.push(rollup.appraisal.clone()),
    }
}
