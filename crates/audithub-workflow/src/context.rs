//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use audithub_core::types::UserId;
use audithub_entity::user::{UserIdentity, UserRole};

/// Context for the current authenticated request.
///
/// Built by the transport layer from the verified session and passed into
/// every service method so each operation knows *who* is acting. The
/// identity snapshot is also what gets stamped into approval records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's identity snapshot.
    pub user: UserIdentity,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user: UserIdentity) -> Self {
        Self {
            user,
            request_time: Utc::now(),
        }
    }

    /// The caller's user ID.
    pub fn user_id(&self) -> UserId {
        self.user.id
    }

    /// The caller's role.
    pub fn role(&self) -> UserRole {
        self.user.role
    }
}
