//! The audit workflow service.
//!
//! One service instance owns the collaborators of the engine: the
//! document store, the permission gate, the settings provider, the
//! report generator and the realtime fan-out. Every operation follows
//! the same shape: check the caller's capability, fetch a review policy
//! snapshot, run validations and the mutation atomically against the
//! store, then notify subscribers of the touched audit.

mod content;
mod discussion;
mod lifecycle;
mod review;

pub use content::{FindingPatch, GeneralUpdate, SectionUpdate};
pub use lifecycle::{AuditSummary, CreateAuditRequest};

use std::sync::Arc;

use audithub_core::error::AppError;
use audithub_core::result::AppResult;
use audithub_core::review::{ReviewPolicy, SettingsProvider};
use audithub_core::types::AuditId;
use audithub_entity::audit::Audit;
use audithub_entity::user::UserIdentity;
use audithub_realtime::broadcaster::ChangeBroadcaster;
use audithub_realtime::presence::PresenceTracker;
use audithub_store::store::AuditStore;

use crate::context::RequestContext;
use crate::policy::{Capability, PermissionGate};
use crate::report::ReportGenerator;

/// Orchestrates the audit review and collaboration workflow.
#[derive(Clone)]
pub struct AuditService {
    /// Audit document store.
    store: Arc<dyn AuditStore>,
    /// External permission evaluator.
    gate: Arc<dyn PermissionGate>,
    /// Source of the deployment-wide review policy.
    settings: Arc<dyn SettingsProvider>,
    /// Report renderer.
    reports: Arc<dyn ReportGenerator>,
    /// Change fan-out to connected clients.
    broadcaster: Arc<ChangeBroadcaster>,
    /// Who is connected to which audit.
    presence: Arc<PresenceTracker>,
}

impl AuditService {
    /// Creates a new workflow service.
    pub fn new(
        store: Arc<dyn AuditStore>,
        gate: Arc<dyn PermissionGate>,
        settings: Arc<dyn SettingsProvider>,
        reports: Arc<dyn ReportGenerator>,
        broadcaster: Arc<ChangeBroadcaster>,
        presence: Arc<PresenceTracker>,
    ) -> Self {
        Self {
            store,
            gate,
            settings,
            reports,
            broadcaster,
            presence,
        }
    }

    /// The configured review policy, fetched once per operation so a
    /// settings change cannot flip semantics mid-request.
    pub(crate) async fn policy(&self) -> AppResult<ReviewPolicy> {
        self.settings.review_policy().await
    }

    /// Require a deployment-wide capability with no audit in hand.
    pub(crate) fn require(&self, ctx: &RequestContext, capability: Capability) -> AppResult<()> {
        if self.gate.is_allowed(ctx.role(), capability) {
            return Ok(());
        }
        Err(AppError::permission_denied(format!(
            "The '{capability}' capability is required for this operation"
        )))
    }

    /// Load an audit or fail with `NotFound`.
    pub(crate) async fn load(&self, audit_id: AuditId) -> AppResult<Audit> {
        self.store
            .find(audit_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Audit {audit_id} was not found")))
    }
}

/// Authorize an audit-scoped action: the `-all` capability grants it on
/// any audit, the plain capability only on audits the caller is a
/// participant of.
///
/// A free function so atomic store mutations can re-check against the
/// authoritative document they are about to modify.
pub(crate) fn authorize(
    gate: &dyn PermissionGate,
    user: &UserIdentity,
    audit: &Audit,
    capability: Capability,
    capability_all: Capability,
) -> AppResult<()> {
    if gate.is_allowed(user.role, capability_all) {
        return Ok(());
    }
    if gate.is_allowed(user.role, capability) && audit.is_participant(user.id) {
        return Ok(());
    }
    Err(AppError::permission_denied(format!(
        "The '{capability}' capability on this audit is required for this operation"
    )))
}

/// Authorize deletion: the plain capability only covers audits the
/// caller created.
pub(crate) fn authorize_delete(
    gate: &dyn PermissionGate,
    user: &UserIdentity,
    audit: &Audit,
) -> AppResult<()> {
    if gate.is_allowed(user.role, Capability::AuditDeleteAll) {
        return Ok(());
    }
    if gate.is_allowed(user.role, Capability::AuditDelete) && audit.creator.id == user.id {
        return Ok(());
    }
    Err(AppError::permission_denied(
        "Only the creator of the audit can delete it",
    ))
}
