use anyhow::Result;

use appraisal::domain::entities::Appraisal;

use super::Session;

pub fn cmd_rollup(session: &Session, year: i32, employee: Option<String>) -> Result<()> {
    let rollup = &session.workflow.rollup;
    let rollups = match employee {
        Some(employee_id) => vec![rollup.roll_up_employee(&session.actor, &employee_id, year)?],
        None => rollup.roll_up_year(&session.actor, year)?,
    };
    let annual: Vec<Appraisal> = rollups.into_iter().map(|r| r.appraisal).collect();
    session.print(annual.as_slice());
    Ok(())
}
