//! Contribution scorer
//!
//! Rule-based suggestion for the research and administration criteria. The
//! output is a pure function of per-category counts, so the reasoning text
//! can be stored verbatim as the audit trail and reproduced later.

use crate::domain::entities::{
    AdminCategory, AdminContribution, ContributionScores, ResearchEntry, ResearchKind,
};
use crate::domain::value_objects::{round1, MAX_SCORE};

/// Score given when nothing was submitted for a category
pub const EMPTY_CATEGORY_SCORE: f64 = 4.0;
const BASE_SCORE: f64 = 5.0;

pub const NO_RESEARCH_REASON: &str = "No research submissions this month.";
pub const NO_ADMIN_REASON: &str = "No administrative contributions recorded";

/// Per-category submission counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContributionCounts {
    pub journal: u32,
    pub conference: u32,
    pub book: u32,
    pub other_research: u32,
    pub committee: u32,
    pub coordination: u32,
    pub mentoring: u32,
    pub other_admin: u32,
}

impl ContributionCounts {
    pub fn tally(research: &[ResearchEntry], admin: &[AdminContribution]) -> Self {
        let mut counts = Self::default();
        for entry in research {
            match entry.kind {
                ResearchKind::Journal => counts.journal += 1,
                ResearchKind::Conference => counts.conference += 1,
                ResearchKind::Book => counts.book += 1,
                ResearchKind::Other => counts.other_research += 1,
            }
        }
        for contribution in admin {
            match contribution.category {
                AdminCategory::Committee => counts.committee += 1,
                AdminCategory::Coordination => counts.coordination += 1,
                AdminCategory::Mentoring => counts.mentoring += 1,
                AdminCategory::Other => counts.other_admin += 1,
            }
        }
        counts
    }

    pub fn research_total(&self) -> u32 {
        self.journal + self.conference + self.book + self.other_research
    }

    pub fn admin_total(&self) -> u32 {
        self.committee + self.coordination + self.mentoring + self.other_admin
    }
}

/// Score the submitted entries
pub fn score_contributions(
    research: &[ResearchEntry],
    admin: &[AdminContribution],
) -> ContributionScores {
    score_counts(&ContributionCounts::tally(research, admin))
}

/// Score from counts alone
pub fn score_counts(counts: &ContributionCounts) -> ContributionScores {
    ContributionScores {
        research: research_score(counts),
        admin: admin_score(counts),
        reasoning: reasoning(counts),
    }
}

fn research_score(c: &ContributionCounts) -> f64 {
    if c.research_total() == 0 {
        return EMPTY_CATEGORY_SCORE;
    }
    let raw = BASE_SCORE
        + 2.0 * f64::from(c.journal)
        + 1.5 * f64::from(c.conference)
        + 2.0 * f64::from(c.book)
        + 1.0 * f64::from(c.other_research);
    round1(raw.min(MAX_SCORE))
}

fn admin_score(c: &ContributionCounts) -> f64 {
    if c.admin_total() == 0 {
        return EMPTY_CATEGORY_SCORE;
    }
    let raw = BASE_SCORE
        + 2.0 * f64::from(c.coordination)
        + 1.5 * f64::from(c.committee)
        + 1.5 * f64::from(c.mentoring)
        + 1.0 * f64::from(c.other_admin);
    round1(raw.min(MAX_SCORE))
}

fn reasoning(c: &ContributionCounts) -> String {
    let mut clauses: Vec<String> = Vec::new();

    if c.research_total() == 0 {
        clauses.push(NO_RESEARCH_REASON.to_string());
    } else {
        push_count(&mut clauses, c.journal, "journal");
        push_count(&mut clauses, c.conference, "conference");
        push_count(&mut clauses, c.book, "book");
        push_count(&mut clauses, c.other_research, "other publication");
    }

    if c.admin_total() == 0 {
        clauses.push(NO_ADMIN_REASON.to_string());
    } else {
        push_count(&mut clauses, c.committee, "committee");
        push_count(&mut clauses, c.coordination, "coordination");
        push_count(&mut clauses, c.mentoring, "mentoring");
        push_count(&mut clauses, c.other_admin, "other contribution");
    }

    format!("{}.", clauses.join(". "))
}

fn push_count(clauses: &mut Vec<String>, count: u32, label: &str) {
    if count > 0 {
        clauses.push(format!("{} {}(s)", count, label));
    }
}
