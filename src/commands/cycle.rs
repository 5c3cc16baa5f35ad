use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use appraisal::application::{CycleFilter, NewCycle};
use appraisal::domain::entities::{Criterion, Period};
use appraisal::presentation::cli::CycleCommand;

use super::Session;

fn read_criteria(path: &Path) -> Result<Vec<Criterion>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read criteria file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid criteria file {}", path.display()))
}

pub fn cmd_cycle(session: &Session, command: CycleCommand) -> Result<()> {
    let cycles = &session.workflow.cycles;
    let actor = &session.actor;

    match command {
        CycleCommand::Create {
            year,
            month,
            name,
            start,
            end,
            criteria,
            activate,
        } => {
            let mut input = NewCycle::new(year, month);
            if let Some(name) = name {
                input = input.with_name(name);
            }
            if let (Some(start), Some(end)) = (start, end) {
                input = input.with_period(Period::new(start, end)?);
            }
            if let Some(path) = criteria {
                input = input.with_criteria(read_criteria(&path)?);
            }
            if activate {
                input = input.activated();
            }
            let cycle = cycles.create_cycle(actor, input)?;
            session.confirm(&format!("Created {} ({})", cycle.id, cycle.status), &cycle);
        }
        CycleCommand::UpdateCriteria { id, criteria } => {
            let cycle = cycles.update_criteria(actor, &id, read_criteria(&criteria)?)?;
            session.print(&cycle);
        }
        CycleCommand::Activate { id } => {
            let cycle = cycles.activate_cycle(actor, &id)?;
            session.confirm(&format!("{} is now {}", cycle.id, cycle.status), &cycle);
        }
        CycleCommand::Complete { id } => {
            let cycle = cycles.complete_cycle(actor, &id)?;
            session.confirm(&format!("{} is now {}", cycle.id, cycle.status), &cycle);
        }
        CycleCommand::Show { id } => session.print(&cycles.get_cycle(&id)?),
        CycleCommand::List { kind, status, year } => {
            let filter = CycleFilter { kind, status, year };
            session.print(cycles.list_cycles(&filter)?.as_slice());
        }
        CycleCommand::Available => {
            session.print(cycles.available_cycles(&actor.id)?.as_slice());
        }
    }
    Ok(())
}
