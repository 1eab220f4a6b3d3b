//! Review workflow operations: submission, approval, revert, export.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use audithub_core::error::AppError;
use audithub_core::events::AuditEvent;
use audithub_core::result::AppResult;
use audithub_core::types::AuditId;
use audithub_entity::audit::Audit;
use audithub_store::store::AuditMutation;

use crate::approvals;
use crate::context::RequestContext;
use crate::policy::Capability;
use crate::report::ReportDocument;
use crate::state;

use super::{authorize, AuditService};

/// Characters stripped from audit names when building a report filename.
const FILENAME_FORBIDDEN: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|', '\n', '\r'];

impl AuditService {
    /// Submits the audit for review (EDIT → REVIEW).
    pub async fn request_review(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
    ) -> AppResult<Audit> {
        let policy = self.policy().await?;
        let gate = self.gate.clone();
        let user = ctx.user.clone();

        let mutation: AuditMutation = Box::new(move |audit| {
            authorize(
                gate.as_ref(),
                &user,
                audit,
                Capability::AuditUpdate,
                Capability::AuditUpdateAll,
            )?;
            state::request_review(audit, &policy)
        });
        let updated = self.store.atomic_update(audit_id, mutation).await?;

        info!(user_id = %ctx.user_id(), audit_id = %audit_id, "Audit submitted for review");
        self.broadcaster
            .notify(audit_id, Some(ctx.user_id()), AuditEvent::StateChanged);
        Ok(updated)
    }

    /// Pulls the audit back to EDIT (REVIEW/APPROVED → EDIT).
    ///
    /// Both editors and reviewers may do this: an editor to resume work,
    /// a reviewer to send the audit back for changes.
    pub async fn revert_to_edit(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
    ) -> AppResult<Audit> {
        let policy = self.policy().await?;
        let gate = self.gate.clone();
        let user = ctx.user.clone();

        let mutation: AuditMutation = Box::new(move |audit| {
            let as_editor = authorize(
                gate.as_ref(),
                &user,
                audit,
                Capability::AuditUpdate,
                Capability::AuditUpdateAll,
            );
            if as_editor.is_err() {
                authorize(
                    gate.as_ref(),
                    &user,
                    audit,
                    Capability::AuditReview,
                    Capability::AuditReviewAll,
                )?;
            }
            state::revert_to_edit(audit, user.id, &policy)
        });
        let updated = self.store.atomic_update(audit_id, mutation).await?;

        info!(user_id = %ctx.user_id(), audit_id = %audit_id, "Audit reverted to edit");
        self.broadcaster
            .notify(audit_id, Some(ctx.user_id()), AuditEvent::StateChanged);
        Ok(updated)
    }

    /// Toggles the caller's approval on the audit.
    ///
    /// Adding or withdrawing an approval re-evaluates the threshold, so
    /// one toggle can move the audit between REVIEW and APPROVED.
    pub async fn toggle_approval(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
    ) -> AppResult<Audit> {
        let policy = self.policy().await?;
        if !policy.enabled {
            return Err(AppError::policy_disabled("Audit reviews are not enabled"));
        }

        let gate = self.gate.clone();
        let user = ctx.user.clone();
        let state_changed = Arc::new(AtomicBool::new(false));
        let state_flag = state_changed.clone();

        let mutation: AuditMutation = Box::new(move |audit| {
            authorize(
                gate.as_ref(),
                &user,
                audit,
                Capability::AuditReview,
                Capability::AuditReviewAll,
            )?;
            approvals::toggle(audit, &user)?;
            if state::evaluate_approval_threshold(audit, &policy) {
                state_flag.store(true, Ordering::Relaxed);
            }
            Ok(())
        });
        let updated = self.store.atomic_update(audit_id, mutation).await?;

        info!(
            user_id = %ctx.user_id(),
            audit_id = %audit_id,
            approvals = updated.approvals.len(),
            state = %updated.state,
            "Approval toggled"
        );
        self.broadcaster
            .notify(audit_id, Some(ctx.user_id()), AuditEvent::ApprovalsUpdated);
        if state_changed.load(Ordering::Relaxed) {
            self.broadcaster
                .notify(audit_id, Some(ctx.user_id()), AuditEvent::StateChanged);
        }
        Ok(updated)
    }

    /// Removes a reviewer from the audit entirely, withdrawing their
    /// approval. Losing an approval can demote an APPROVED audit, so
    /// the threshold is re-evaluated in the same atomic update.
    pub async fn remove_reviewer(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
        reviewer_id: audithub_core::types::UserId,
    ) -> AppResult<Audit> {
        let policy = self.policy().await?;
        let gate = self.gate.clone();
        let user = ctx.user.clone();
        let state_changed = Arc::new(AtomicBool::new(false));
        let state_flag = state_changed.clone();

        let mutation: AuditMutation = Box::new(move |audit| {
            authorize(
                gate.as_ref(),
                &user,
                audit,
                Capability::AuditUpdate,
                Capability::AuditUpdateAll,
            )?;
            approvals::remove_reviewer(audit, reviewer_id);
            if state::evaluate_approval_threshold(audit, &policy) {
                state_flag.store(true, Ordering::Relaxed);
            }
            Ok(())
        });
        let updated = self.store.atomic_update(audit_id, mutation).await?;

        info!(user_id = %ctx.user_id(), audit_id = %audit_id, reviewer_id = %reviewer_id, "Reviewer removed");
        self.broadcaster
            .notify(audit_id, Some(ctx.user_id()), AuditEvent::ApprovalsUpdated);
        if state_changed.load(Ordering::Relaxed) {
            self.broadcaster
                .notify(audit_id, Some(ctx.user_id()), AuditEvent::StateChanged);
        }
        Ok(updated)
    }

    /// Renders the audit report.
    ///
    /// With mandatory review enabled, only APPROVED audits may be
    /// exported.
    pub async fn generate_report(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
    ) -> AppResult<ReportDocument> {
        let audit = self.get_audit(ctx, audit_id).await?;
        if audit.template.is_none() {
            return Err(AppError::template(
                "No report template is configured for the audit",
            ));
        }
        let policy = self.policy().await?;
        state::generate_gate(&audit, &policy)?;

        let content = self.reports.generate_doc(&audit).await?;
        let filename = report_filename(&audit.name);

        info!(
            user_id = %ctx.user_id(),
            audit_id = %audit_id,
            filename = %filename,
            bytes = content.len(),
            "Report generated"
        );

        Ok(ReportDocument { filename, content })
    }
}

/// Builds a safe download filename from the audit name.
fn report_filename(audit_name: &str) -> String {
    let safe: String = audit_name
        .chars()
        .filter(|c| !FILENAME_FORBIDDEN.contains(c))
        .collect();
    let safe = safe.trim();
    if safe.is_empty() {
        "audit.docx".to_string()
    } else {
        format!("{safe}.docx")
    }
}
