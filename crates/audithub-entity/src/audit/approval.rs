//! Approval records in the audit's sign-off ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use audithub_core::types::UserId;

use crate::user::{UserIdentity, UserRole};

/// A reviewer's recorded sign-off on the current content revision.
///
/// This is a denormalized snapshot of the approving reviewer's identity at
/// approval time, not a live reference into the user directory. It
/// intentionally freezes "who approved under what identity," independent
/// of later profile renames; a new record is created whenever the reviewer
/// re-approves after a revert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    /// The approving reviewer's user ID.
    pub reviewer_id: UserId,
    /// The reviewer's role at approval time.
    pub role: UserRole,
    /// The reviewer's username at approval time.
    pub username: String,
    /// The reviewer's first name at approval time.
    pub firstname: String,
    /// The reviewer's last name at approval time.
    pub lastname: String,
    /// When the approval was given.
    pub approved_at: DateTime<Utc>,
}

impl Approval {
    /// Build an approval record from the reviewer's current identity.
    pub fn snapshot_of(reviewer: &UserIdentity) -> Self {
        Self {
            reviewer_id: reviewer.id,
            role: reviewer.role,
            username: reviewer.username.clone(),
            firstname: reviewer.firstname.clone(),
            lastname: reviewer.lastname.clone(),
            approved_at: Utc::now(),
        }
    }
}
