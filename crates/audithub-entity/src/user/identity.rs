//! Identity snapshot of a user as seen by the audit document.

use serde::{Deserialize, Serialize};

use audithub_core::types::UserId;

use super::role::UserRole;

/// A user reference as stored inside an audit document.
///
/// The user directory itself is an external collaborator; audits carry
/// these lightweight snapshots in their participant lists and stamp them
/// into approval records at approval time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// The user's identifier in the external directory.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// First name.
    pub firstname: String,
    /// Last name.
    pub lastname: String,
    /// The user's role at the time the snapshot was taken.
    pub role: UserRole,
}

impl UserIdentity {
    /// Create a new identity snapshot.
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            firstname: firstname.into(),
            lastname: lastname.into(),
            role,
        }
    }
}
