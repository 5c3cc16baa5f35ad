//! Workflow status value objects
//!
//! Appraisal and cycle statuses are closed enums. Every transition site
//! matches them exhaustively, and both only ever move forward.

use serde::{Deserialize, Serialize};

/// Position of an appraisal in the review workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AppraisalStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "Self Assessment")]
    SelfAssessment,
    Submitted,
    Reviewed,
    Completed,
}

impl AppraisalStatus {
    /// The only status this one may advance to, if any
    pub fn next(&self) -> Option<AppraisalStatus> {
        match self {
            AppraisalStatus::NotStarted => Some(AppraisalStatus::SelfAssessment),
            AppraisalStatus::SelfAssessment => Some(AppraisalStatus::Submitted),
            AppraisalStatus::Submitted => Some(AppraisalStatus::Reviewed),
            AppraisalStatus::Reviewed => Some(AppraisalStatus::Completed),
            AppraisalStatus::Completed => None,
        }
    }

    pub fn can_advance_to(&self, target: AppraisalStatus) -> bool {
        self.next() == Some(target)
    }

    /// Employee-owned content may only change while self assessing
    pub fn is_editable(&self) -> bool {
        matches!(self, AppraisalStatus::SelfAssessment)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppraisalStatus::NotStarted => "Not Started",
            AppraisalStatus::SelfAssessment => "Self Assessment",
            AppraisalStatus::Submitted => "Submitted",
            AppraisalStatus::Reviewed => "Reviewed",
            AppraisalStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for AppraisalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for AppraisalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "not started" => Ok(AppraisalStatus::NotStarted),
            "self assessment" => Ok(AppraisalStatus::SelfAssessment),
            "submitted" => Ok(AppraisalStatus::Submitted),
            "reviewed" => Ok(AppraisalStatus::Reviewed),
            "completed" => Ok(AppraisalStatus::Completed),
            other => Err(format!("unknown appraisal status '{}'", other)),
        }
    }
}

/// Lifecycle of an appraisal cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CycleStatus {
    Draft,
    Active,
    Completed,
}

impl CycleStatus {
    pub fn next(&self) -> Option<CycleStatus> {
        match self {
            CycleStatus::Draft => Some(CycleStatus::Active),
            CycleStatus::Active => Some(CycleStatus::Completed),
            CycleStatus::Completed => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CycleStatus::Draft => "Draft",
            CycleStatus::Active => "Active",
            CycleStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for CycleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for CycleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(CycleStatus::Draft),
            "active" => Ok(CycleStatus::Active),
            "completed" => Ok(CycleStatus::Completed),
            other => Err(format!("unknown cycle status '{}'", other)),
        }
    }
}

/// Monthly cycles are authored; annual cycles are synthesized by the rollup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CycleKind {
    Monthly,
    Annual,
}

impl std::fmt::Display for CycleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CycleKind::Monthly => write!(f, "Monthly"),
            CycleKind::Annual => write!(f, "Annual"),
        }
    }
}

impl std::str::FromStr for CycleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(CycleKind::Monthly),
            "annual" => Ok(CycleKind::Annual),
            other => Err(format!("unknown cycle kind '{}' (expected monthly or annual)", other)),
        }
    }
}
