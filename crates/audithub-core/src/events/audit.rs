//! Audit-related domain events.

use serde::{Deserialize, Serialize};

/// Events related to audit document mutations.
///
/// Delivery is at-most-once best-effort to currently connected
/// subscribers; the variants name only *what* changed, never the new
/// value, so no ordering guarantee is needed between the broadcast and
/// the persisted write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditEvent {
    /// General information (name, dates, roles, custom fields) changed.
    GeneralUpdated,
    /// The scope list changed.
    ScopeUpdated,
    /// A finding was added.
    FindingCreated,
    /// A finding's content changed.
    FindingUpdated,
    /// A finding was removed.
    FindingDeleted,
    /// A finding was moved to a new position.
    FindingsReordered,
    /// The sort strategy changed.
    SortStrategyUpdated,
    /// A section's content changed.
    SectionUpdated,
    /// The approval ledger changed.
    ApprovalsUpdated,
    /// The workflow state changed.
    StateChanged,
    /// The audit was attached to a multi-audit parent.
    ParentAttached,
    /// The audit was detached from its multi-audit parent.
    ParentDetached,
    /// A comment thread was created.
    CommentCreated,
    /// A comment thread was updated (text, reply, resolution).
    CommentUpdated,
    /// A comment thread was deleted.
    CommentDeleted,
    /// The audit itself was deleted.
    AuditDeleted,
}
