//! Audit list filters.

use audithub_core::types::{AuditId, UserId};
use audithub_entity::audit::AuditKind;

/// Filter for audit list queries.
///
/// All criteria are conjunctive; `None` means "don't filter on this".
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    /// Case-insensitive substring match on any finding title.
    pub finding_title: Option<String>,
    /// Match on the audit kind.
    pub kind: Option<AuditKind>,
    /// Match on the parent audit.
    pub parent_id: Option<AuditId>,
    /// Restrict to audits the user participates in (creator,
    /// collaborator, or reviewer). Callers with a read-all capability
    /// leave this unset.
    pub participant: Option<UserId>,
}

impl AuditFilter {
    /// Filter matching every audit.
    pub fn any() -> Self {
        Self::default()
    }

    /// Filter for the children of a multi-audit.
    pub fn children_of(parent_id: AuditId) -> Self {
        Self {
            parent_id: Some(parent_id),
            ..Self::default()
        }
    }

    /// Whether the audit matches this filter.
    pub fn matches(&self, audit: &audithub_entity::audit::Audit) -> bool {
        if let Some(needle) = &self.finding_title {
            let needle = needle.to_lowercase();
            if !audit
                .findings
                .iter()
                .any(|f| f.title.to_lowercase().contains(&needle))
            {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if audit.kind != kind {
                return false;
            }
        }
        if let Some(parent_id) = self.parent_id {
            if audit.parent_id != Some(parent_id) {
                return false;
            }
        }
        if let Some(user_id) = self.participant {
            if !audit.is_participant(user_id) {
                return false;
            }
        }
        true
    }
}
