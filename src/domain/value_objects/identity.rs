//! Acting identity
//!
//! Resolved by the identity collaborator and passed explicitly into every
//! state transition. The engine never authenticates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    Admin,
    #[default]
    Faculty,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::Faculty => write!(f, "Faculty"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" | "hr" => Ok(Role::Admin),
            "faculty" => Ok(Role::Faculty),
            other => Err(format!("unknown role '{}' (expected admin or faculty)", other)),
        }
    }
}

/// The employee or administrator triggering an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub department: String,
    pub role: Role,
}

impl Identity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: department.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Snapshot stored on appraisals this identity owns
    pub fn employee_ref(&self) -> EmployeeRef {
        EmployeeRef {
            id: self.id.clone(),
            name: self.name.clone(),
            department: self.department.clone(),
        }
    }
}

/// Employee snapshot stored on an appraisal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRef {
    pub id: String,
    pub name: String,
    pub department: String,
}
