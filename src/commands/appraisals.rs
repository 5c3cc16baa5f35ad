use anyhow::{Context, Result};

use appraisal::application::AppraisalFilter;
use appraisal::domain::entities::{NewAdminContribution, NewResearchEntry};
use appraisal::domain::services::FinalizeOverrides;
use appraisal::presentation::cli::AppraisalCommand;

use super::Session;

pub fn cmd_appraisal(session: &Session, command: AppraisalCommand) -> Result<()> {
    let appraisals = &session.workflow.appraisals;
    let actor = &session.actor;

    match command {
        AppraisalCommand::Create { cycle } => {
            let appraisal = appraisals.create_appraisal(actor, &cycle)?;
            session.confirm(&format!("Started {}", appraisal.id), &appraisal);
        }
        AppraisalCommand::AddResearch {
            id,
            title,
            kind,
            description,
            documents,
        } => {
            let entry = NewResearchEntry::new(title, kind)
                .with_description(description)
                .with_documents(documents);
            let (appraisal, entry_id) = appraisals.add_research_entry(actor, &id, entry)?;
            session.confirm(&format!("Added {} to {}", entry_id, appraisal.id), &appraisal);
        }
        AppraisalCommand::RemoveResearch { id, entry } => {
            let appraisal = appraisals.remove_research_entry(actor, &id, &entry)?;
            session.confirm(&format!("Removed {} from {}", entry, appraisal.id), &appraisal);
        }
        AppraisalCommand::AddAdmin {
            id,
            title,
            category,
            description,
        } => {
            let contribution =
                NewAdminContribution::new(title, category).with_description(description);
            let (appraisal, entry_id) =
                appraisals.add_admin_contribution(actor, &id, contribution)?;
            session.confirm(&format!("Added {} to {}", entry_id, appraisal.id), &appraisal);
        }
        AppraisalCommand::RemoveAdmin { id, entry } => {
            let appraisal = appraisals.remove_admin_contribution(actor, &id, &entry)?;
            session.confirm(&format!("Removed {} from {}", entry, appraisal.id), &appraisal);
        }
        AppraisalCommand::SetScore {
            id,
            criterion,
            score,
            comment,
        } => {
            let appraisal = appraisals.set_self_score(actor, &id, &criterion, score, &comment)?;
            session.confirm(
                &format!("Recorded {:.1} for {} on {}", score, criterion, appraisal.id),
                &appraisal,
            );
        }
        AppraisalCommand::Preview { id } => {
            session.print(&appraisals.preview_contribution_scores(actor, &id)?);
        }
        AppraisalCommand::Submit { id } => {
            session.print(&appraisals.submit_appraisal(actor, &id)?);
        }
        AppraisalCommand::Review {
            id,
            scores,
            comments,
        } => {
            let mut draft = appraisals.start_review(actor, &id)?;
            for (criterion, raw) in scores {
                let score: f64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("score for '{}' is not a number: {}", criterion, raw))?;
                draft.set_score(&criterion, score)?;
            }
            for (criterion, text) in comments {
                draft.set_comment(&criterion, text)?;
            }
            session.print(&appraisals.submit_review(actor, draft)?);
        }
        AppraisalCommand::Finalize {
            id,
            score,
            category,
            recommendations,
        } => {
            let overrides = FinalizeOverrides {
                final_score: score,
                category,
                recommendations,
            };
            session.print(&appraisals.finalize_appraisal(actor, &id, overrides)?);
        }
        AppraisalCommand::Show { id } => session.print(&appraisals.get_appraisal(actor, &id)?),
        AppraisalCommand::List {
            employee,
            cycle,
            status,
        } => {
            let filter = AppraisalFilter {
                employee_id: employee,
                cycle_id: cycle,
                status,
            };
            session.print(appraisals.list_appraisals(actor, &filter)?.as_slice());
        }
    }
    Ok(())
}
