//! Contribution entries submitted during self assessment
//!
//! Entries may be added and removed while the owning appraisal is editable
//! and are frozen once it is submitted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResearchKind {
    Journal,
    Conference,
    Book,
    Other,
}

impl std::str::FromStr for ResearchKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "journal" => Ok(ResearchKind::Journal),
            "conference" => Ok(ResearchKind::Conference),
            "book" => Ok(ResearchKind::Book),
            "other" => Ok(ResearchKind::Other),
            other => Err(format!("unknown research kind '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub kind: ResearchKind,
    #[serde(default)]
    pub attached_document_refs: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdminCategory {
    Committee,
    Coordination,
    Mentoring,
    Other,
}

impl std::str::FromStr for AdminCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "committee" => Ok(AdminCategory::Committee),
            "coordination" => Ok(AdminCategory::Coordination),
            "mentoring" => Ok(AdminCategory::Mentoring),
            "other" => Ok(AdminCategory::Other),
            other => Err(format!("unknown contribution category '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminContribution {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: AdminCategory,
    pub submitted_at: DateTime<Utc>,
}

/// Draft of a research entry before the appraisal assigns it an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewResearchEntry {
    pub title: String,
    pub description: String,
    pub kind: ResearchKind,
    pub attached_document_refs: Vec<String>,
}

impl NewResearchEntry {
    pub fn new(title: impl Into<String>, kind: ResearchKind) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            kind,
            attached_document_refs: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_documents(mut self, refs: Vec<String>) -> Self {
        self.attached_document_refs = refs;
        self
    }
}

/// Draft of an administrative contribution before it is assigned an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewAdminContribution {
    pub title: String,
    pub description: String,
    pub category: AdminCategory,
}

impl NewAdminContribution {
    pub fn new(title: impl Into<String>, category: AdminCategory) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            category,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Next sequential id for a prefix, e.g. `RE-3` after `RE-1`, `RE-2`
pub(crate) fn next_entry_id<'a, I>(prefix: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let max = existing
        .into_iter()
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|rest| rest.strip_prefix('-'))
        .filter_map(|n| n.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{}-{}", prefix, max + 1)
}
