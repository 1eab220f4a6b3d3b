//! # audithub-workflow
//!
//! The audit review and collaboration workflow engine. This crate owns
//! the state machine governing the document lifecycle (EDIT / REVIEW /
//! APPROVED), the role disjointness validator, the approval ledger, the
//! finding ordering engine, and the comment thread manager. The
//! [`AuditService`] facade wires permission checks, the edit-lock gate,
//! atomic store updates, and post-commit change broadcasting into every
//! operation.
//!
//! Services follow constructor injection — all collaborators are provided
//! at construction time via `Arc` references, and every operation takes
//! one review-policy snapshot up front.

pub mod approvals;
pub mod comments;
pub mod context;
pub mod ordering;
pub mod policy;
pub mod report;
pub mod roles;
pub mod service;
pub mod settings;
pub mod state;

pub use comments::{CommentPatch, NewComment};
pub use context::RequestContext;
pub use policy::{Capability, PermissionGate, RolePolicies};
pub use report::{ReportDocument, ReportGenerator};
pub use roles::RoleUpdate;
pub use service::{AuditService, AuditSummary, CreateAuditRequest, FindingPatch, GeneralUpdate, SectionUpdate};
pub use settings::StaticSettings;
