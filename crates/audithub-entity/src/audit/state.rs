//! Audit workflow state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow state of an audit document.
///
/// Every audit starts in `Edit`. There is no terminal state: an audit
/// remains mutable or revivable until it is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditState {
    /// Content is editable (subject to permissions).
    Edit,
    /// Content is frozen; reviewers may approve.
    Review,
    /// Enough reviewers have approved; derived from the approval count.
    Approved,
}

impl AuditState {
    /// Whether approvals may be given or withdrawn in this state.
    pub fn is_approvable(&self) -> bool {
        matches!(self, Self::Review | Self::Approved)
    }

    /// Return the state as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Edit => "EDIT",
            Self::Review => "REVIEW",
            Self::Approved => "APPROVED",
        }
    }
}

impl fmt::Display for AuditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
