//! The audit document model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use audithub_core::types::{AuditId, CommentId, CompanyId, FindingId, SectionId, TemplateId, UserId};

use crate::comment::Comment;
use crate::custom_field::CustomField;
use crate::finding::Finding;
use crate::section::Section;
use crate::user::UserIdentity;

use super::approval::Approval;
use super::sort::FindingSorting;
use super::state::AuditState;

/// Kind of audit document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuditKind {
    /// A standalone assessment, optionally linked into a multi-audit.
    #[default]
    Default,
    /// A container grouping several standalone audits via `parent_id`.
    Multi,
    /// A derived audit tracking whether reported findings were fixed.
    Retest,
}

/// One scope item (a target asset group) of the assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeItem {
    /// Scope name (e.g. an application or network segment).
    pub name: String,
    /// Hosts in this scope.
    #[serde(default)]
    pub hosts: Vec<String>,
}

impl ScopeItem {
    /// Create a scope item with no hosts.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hosts: Vec::new(),
        }
    }
}

/// Reference to the client company, by directory ID or free-form name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRef {
    /// Directory identifier, when the company is registered.
    pub id: Option<CompanyId>,
    /// Free-form name, when it is not.
    pub name: Option<String>,
}

/// The shared document representing one security assessment under review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Audit {
    /// Unique identifier.
    pub id: AuditId,
    /// Display name.
    pub name: String,
    /// Report language tag.
    pub language: String,
    /// Name of the assessment type (defines the section set).
    pub audit_type: String,
    /// Document kind.
    #[serde(rename = "type", default)]
    pub kind: AuditKind,
    /// Containing multi-audit, only meaningful when `kind` is `Default`
    /// (or `Retest`, which links back to its source audit).
    pub parent_id: Option<AuditId>,
    /// The creating user. Immutable after creation.
    pub creator: UserIdentity,
    /// Users permitted to edit content but not approve.
    #[serde(default)]
    pub collaborators: Vec<UserIdentity>,
    /// Users permitted to approve but not edit content.
    #[serde(default)]
    pub reviewers: Vec<UserIdentity>,
    /// Workflow state.
    pub state: AuditState,
    /// The approval ledger for the current revision.
    #[serde(default)]
    pub approvals: Vec<Approval>,
    /// Ordered findings; array order is the manual display order.
    #[serde(default)]
    pub findings: Vec<Finding>,
    /// Report sections, defined by the audit type.
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Sort strategy for findings.
    #[serde(default)]
    pub sort_findings: FindingSorting,
    /// Assessment scope.
    #[serde(default)]
    pub scope: Vec<ScopeItem>,
    /// Comment threads anchored to finding/section fields.
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Document-level custom field values.
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
    /// Client contact.
    pub client: Option<String>,
    /// Client company.
    pub company: Option<CompanyRef>,
    /// Report template to render with.
    pub template: Option<TemplateId>,
    /// Report date.
    pub date: Option<DateTime<Utc>>,
    /// Assessment start date.
    pub date_start: Option<DateTime<Utc>>,
    /// Assessment end date.
    pub date_end: Option<DateTime<Utc>>,
    /// When the audit was created.
    pub created_at: DateTime<Utc>,
    /// When the audit was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Audit {
    /// Create a new audit in the initial EDIT state.
    pub fn new(
        name: impl Into<String>,
        language: impl Into<String>,
        audit_type: impl Into<String>,
        kind: AuditKind,
        creator: UserIdentity,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: AuditId::new(),
            name: name.into(),
            language: language.into(),
            audit_type: audit_type.into(),
            kind,
            parent_id: None,
            creator,
            collaborators: Vec::new(),
            reviewers: Vec::new(),
            state: AuditState::Edit,
            approvals: Vec::new(),
            findings: Vec::new(),
            sections: Vec::new(),
            sort_findings: FindingSorting::default(),
            scope: Vec::new(),
            comments: Vec::new(),
            custom_fields: Vec::new(),
            client: None,
            company: None,
            template: None,
            date: None,
            date_start: None,
            date_end: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the user appears in any participant list of this audit.
    pub fn is_participant(&self, user_id: UserId) -> bool {
        self.creator.id == user_id
            || self.collaborators.iter().any(|u| u.id == user_id)
            || self.reviewers.iter().any(|u| u.id == user_id)
    }

    /// Whether the user is in the reviewer list.
    pub fn is_reviewer(&self, user_id: UserId) -> bool {
        self.reviewers.iter().any(|u| u.id == user_id)
    }

    /// Whether the reviewer currently has an approval on record.
    pub fn has_approval_from(&self, user_id: UserId) -> bool {
        self.approvals.iter().any(|a| a.reviewer_id == user_id)
    }

    /// Look up a finding by ID.
    pub fn finding(&self, id: FindingId) -> Option<&Finding> {
        self.findings.iter().find(|f| f.id == id)
    }

    /// Look up a finding by ID, mutably.
    pub fn finding_mut(&mut self, id: FindingId) -> Option<&mut Finding> {
        self.findings.iter_mut().find(|f| f.id == id)
    }

    /// Look up a section by ID.
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Look up a section by ID, mutably.
    pub fn section_mut(&mut self, id: SectionId) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    /// Look up a comment by ID, mutably.
    pub fn comment_mut(&mut self, id: CommentId) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|c| c.id == id)
    }
}
