//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the permission system.
///
/// The role decides which capabilities the permission gate grants; the
/// per-audit participant lists (creator, collaborators, reviewers) decide
/// which documents those capabilities reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full administrator: every capability, including the `-all` variants.
    Admin,
    /// Regular user: can create and edit audits they participate in.
    User,
    /// Reviewer: can read and approve audits, but not edit content.
    Reviewer,
}

impl UserRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Reviewer => "reviewer",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = audithub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "reviewer" => Ok(Self::Reviewer),
            _ => Err(audithub_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, user, reviewer"
            ))),
        }
    }
}
