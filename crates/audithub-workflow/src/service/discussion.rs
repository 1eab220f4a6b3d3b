//! Comment thread operations.
//!
//! Comments deliberately bypass the edit lock: discussing a submitted
//! audit is the whole point of the review state, so creating, updating
//! and resolving threads is allowed in any workflow state. They also
//! never invalidate approvals.

use tracing::info;

use audithub_core::error::AppError;
use audithub_core::events::AuditEvent;
use audithub_core::result::AppResult;
use audithub_core::types::{AuditId, CommentId};
use audithub_entity::audit::Audit;
use audithub_store::store::AuditMutation;

use crate::comments::{self, CommentPatch, NewComment};
use crate::context::RequestContext;
use crate::policy::Capability;

use super::{authorize, AuditService};

impl AuditService {
    /// Creates a comment thread on a finding or section field.
    pub async fn create_comment(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
        mut new: NewComment,
    ) -> AppResult<Audit> {
        new.author = ctx.user_id();
        let now = ctx.request_time;

        let gate = self.gate.clone();
        let user = ctx.user.clone();
        let mutation: AuditMutation = Box::new(move |audit| {
            authorize(
                gate.as_ref(),
                &user,
                audit,
                Capability::CommentCreate,
                Capability::CommentCreateAll,
            )?;
            comments::create_comment(audit, new, now)?;
            Ok(())
        });
        let updated = self.store.atomic_update(audit_id, mutation).await?;

        info!(user_id = %ctx.user_id(), audit_id = %audit_id, "Comment created");
        self.broadcaster
            .notify(audit_id, Some(ctx.user_id()), AuditEvent::CommentCreated);
        Ok(updated)
    }

    /// Updates a comment thread (text, replies, resolution).
    pub async fn update_comment(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
        comment_id: CommentId,
        patch: CommentPatch,
    ) -> AppResult<Audit> {
        let gate = self.gate.clone();
        let user = ctx.user.clone();
        let mutation: AuditMutation = Box::new(move |audit| {
            authorize(
                gate.as_ref(),
                &user,
                audit,
                Capability::CommentUpdate,
                Capability::CommentUpdateAll,
            )?;
            comments::update_comment(audit, comment_id, patch)
        });
        let updated = self.store.atomic_update(audit_id, mutation).await?;

        info!(user_id = %ctx.user_id(), audit_id = %audit_id, comment_id = %comment_id, "Comment updated");
        self.broadcaster
            .notify(audit_id, Some(ctx.user_id()), AuditEvent::CommentUpdated);
        Ok(updated)
    }

    /// Deletes a comment thread. Only the author may delete their own
    /// comment unless the caller holds the delete-all capability.
    pub async fn delete_comment(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
        comment_id: CommentId,
    ) -> AppResult<Audit> {
        let gate = self.gate.clone();
        let user = ctx.user.clone();
        let mutation: AuditMutation = Box::new(move |audit| {
            authorize(
                gate.as_ref(),
                &user,
                audit,
                Capability::CommentDelete,
                Capability::CommentDeleteAll,
            )?;
            if !gate.is_allowed(user.role, Capability::CommentDeleteAll) {
                let comment = audit
                    .comments
                    .iter()
                    .find(|c| c.id == comment_id)
                    .ok_or_else(|| {
                        AppError::not_found(format!(
                            "Comment {comment_id} was not found on the audit"
                        ))
                    })?;
                if comment.author != user.id {
                    return Err(AppError::permission_denied(
                        "Only the author of a comment can delete it",
                    ));
                }
            }
            comments::delete_comment(audit, comment_id)
        });
        let updated = self.store.atomic_update(audit_id, mutation).await?;

        info!(user_id = %ctx.user_id(), audit_id = %audit_id, comment_id = %comment_id, "Comment deleted");
        self.broadcaster
            .notify(audit_id, Some(ctx.user_id()), AuditEvent::CommentDeleted);
        Ok(updated)
    }
}
