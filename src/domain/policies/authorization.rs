//! Authorization Policy
//!
//! Who may trigger which workflow transition. The acting identity is always
//! an explicit argument; there is no ambient "current user".

use crate::domain::value_objects::Identity;
use crate::error::{AppraisalError, AppraisalResult};

/// Operations subject to authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    /// Create, edit, activate or complete a monthly cycle
    AuthorCycle,
    /// Create, edit or submit one's own appraisal
    SelfAssess { owner_id: &'a str },
    /// Start or submit the reviewer stage
    Review { owner_id: &'a str },
    /// Record the HR decision
    Finalize { owner_id: &'a str },
    /// Generate annual summaries
    RollUp,
    /// Read an appraisal
    View { owner_id: &'a str },
}

impl Action<'_> {
    pub fn describe(&self) -> String {
        match self {
            Action::AuthorCycle => "author appraisal cycles".to_string(),
            Action::SelfAssess { owner_id } => format!("edit the appraisal of '{}'", owner_id),
            Action::Review { owner_id } => format!("review the appraisal of '{}'", owner_id),
            Action::Finalize { owner_id } => format!("finalize the appraisal of '{}'", owner_id),
            Action::RollUp => "generate annual appraisals".to_string(),
            Action::View { owner_id } => format!("view the appraisal of '{}'", owner_id),
        }
    }
}

/// Role and ownership rules
///
/// - cycle authoring and rollup require the Admin role
/// - self assessment is restricted to the appraisal's owner
/// - review and finalization require Admin and never apply to one's own record
/// - viewing is allowed to the owner and to any Admin
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationPolicy;

impl AuthorizationPolicy {
    pub fn permits(&self, actor: &Identity, action: Action<'_>) -> bool {
        match action {
            Action::AuthorCycle | Action::RollUp => actor.is_admin(),
            Action::SelfAssess { owner_id } => actor.id == owner_id,
            Action::Review { owner_id } | Action::Finalize { owner_id } => {
                actor.is_admin() && actor.id != owner_id
            }
            Action::View { owner_id } => actor.is_admin() || actor.id == owner_id,
        }
    }

    pub fn check(&self, actor: &Identity, action: Action<'_>) -> AppraisalResult<()> {
        if self.permits(actor, action) {
            Ok(())
        } else {
            Err(AppraisalError::PermissionDenied {
                actor: actor.id.clone(),
                action: action.describe(),
            })
        }
    }
}
