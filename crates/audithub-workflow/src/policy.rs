//! Capabilities and the role-to-capability permission gate.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use audithub_entity::user::UserRole;

/// Capabilities checked against the permission gate before every operation.
///
/// The plain variants grant the action on audits the caller participates
/// in; the `-all` variants extend it to every audit in the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Read audits the caller participates in.
    AuditRead,
    /// Read any audit.
    AuditReadAll,
    /// Create audits.
    AuditCreate,
    /// Update content of audits the caller participates in.
    AuditUpdate,
    /// Update content of any audit.
    AuditUpdateAll,
    /// Delete audits the caller created.
    AuditDelete,
    /// Delete any audit.
    AuditDeleteAll,
    /// Approve audits the caller reviews.
    AuditReview,
    /// Approve any audit.
    AuditReviewAll,
    /// Create comments on audits the caller participates in.
    CommentCreate,
    /// Create comments on any audit.
    CommentCreateAll,
    /// Update comments on audits the caller participates in.
    CommentUpdate,
    /// Update comments on any audit.
    CommentUpdateAll,
    /// Delete comments on audits the caller participates in.
    CommentDelete,
    /// Delete comments on any audit.
    CommentDeleteAll,
    /// See which users are connected to an audit.
    UsersConnected,
}

impl Capability {
    /// Return the capability as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuditRead => "audits:read",
            Self::AuditReadAll => "audits:read-all",
            Self::AuditCreate => "audits:create",
            Self::AuditUpdate => "audits:update",
            Self::AuditUpdateAll => "audits:update-all",
            Self::AuditDelete => "audits:delete",
            Self::AuditDeleteAll => "audits:delete-all",
            Self::AuditReview => "audits:review",
            Self::AuditReviewAll => "audits:review-all",
            Self::CommentCreate => "audits:comments:create",
            Self::CommentCreateAll => "audits:comments:create-all",
            Self::CommentUpdate => "audits:comments:update",
            Self::CommentUpdateAll => "audits:comments:update-all",
            Self::CommentDelete => "audits:comments:delete",
            Self::CommentDeleteAll => "audits:comments:delete-all",
            Self::UsersConnected => "audits:users-connected",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Collaborator trait for the external permission evaluator.
///
/// Consulted before every operation; the built-in [`RolePolicies`] matrix
/// implements it for deployments without an external ACL service.
pub trait PermissionGate: Send + Sync + 'static {
    /// Whether the role holds the capability.
    fn is_allowed(&self, role: UserRole, capability: Capability) -> bool;
}

/// Defines the mapping from each role to its set of capabilities.
#[derive(Debug, Clone)]
pub struct RolePolicies {
    /// Role → set of capabilities.
    policies: HashMap<UserRole, HashSet<Capability>>,
}

impl RolePolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        let mut policies = HashMap::new();

        // Reviewer: read, approve, and discuss
        let reviewer: HashSet<Capability> = [
            Capability::AuditRead,
            Capability::AuditReview,
            Capability::CommentCreate,
            Capability::CommentUpdate,
            Capability::UsersConnected,
        ]
        .into_iter()
        .collect();
        policies.insert(UserRole::Reviewer, reviewer);

        // User: full lifecycle on own audits
        let user: HashSet<Capability> = [
            Capability::AuditRead,
            Capability::AuditCreate,
            Capability::AuditUpdate,
            Capability::AuditDelete,
            Capability::CommentCreate,
            Capability::CommentUpdate,
            Capability::CommentDelete,
            Capability::UsersConnected,
        ]
        .into_iter()
        .collect();
        policies.insert(UserRole::User, user);

        // Admin: everything
        let admin: HashSet<Capability> = [
            Capability::AuditRead,
            Capability::AuditReadAll,
            Capability::AuditCreate,
            Capability::AuditUpdate,
            Capability::AuditUpdateAll,
            Capability::AuditDelete,
            Capability::AuditDeleteAll,
            Capability::AuditReview,
            Capability::AuditReviewAll,
            Capability::CommentCreate,
            Capability::CommentCreateAll,
            Capability::CommentUpdate,
            Capability::CommentUpdateAll,
            Capability::CommentDelete,
            Capability::CommentDeleteAll,
            Capability::UsersConnected,
        ]
        .into_iter()
        .collect();
        policies.insert(UserRole::Admin, admin);

        Self { policies }
    }
}

impl Default for RolePolicies {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionGate for RolePolicies {
    fn is_allowed(&self, role: UserRole, capability: Capability) -> bool {
        self.policies
            .get(&role)
            .is_some_and(|caps| caps.contains(&capability))
    }
}
