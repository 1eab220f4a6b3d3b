//! Audit lifecycle: creation, listing, linking and deletion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use audithub_core::error::AppError;
use audithub_core::events::AuditEvent;
use audithub_core::result::AppResult;
use audithub_core::types::AuditId;
use audithub_entity::audit::{Audit, AuditKind, AuditState};
use audithub_entity::finding::RetestStatus;
use audithub_store::filter::AuditFilter;

use crate::context::RequestContext;
use crate::policy::Capability;
use crate::state::edit_lock_check;

use super::{authorize, authorize_delete, AuditService};

/// Data for creating a new audit.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAuditRequest {
    /// Audit display name.
    #[validate(length(min = 1, max = 255, message = "Audit name is required"))]
    pub name: String,
    /// Report language tag.
    #[validate(length(min = 1, message = "Language is required"))]
    pub language: String,
    /// Name of the assessment type.
    #[validate(length(min = 1, message = "Audit type is required"))]
    pub audit_type: String,
    /// Document kind.
    #[serde(rename = "type", default)]
    pub kind: AuditKind,
    /// Multi-audit to attach the new audit to.
    #[serde(default)]
    pub parent_id: Option<AuditId>,
}

/// One row of an audit listing, with live presence attached.
#[derive(Debug, Clone, Serialize)]
pub struct AuditSummary {
    pub id: AuditId,
    pub name: String,
    pub language: String,
    pub audit_type: String,
    #[serde(rename = "type")]
    pub kind: AuditKind,
    pub parent_id: Option<AuditId>,
    pub state: AuditState,
    pub creator_username: String,
    pub created_at: DateTime<Utc>,
    /// Usernames currently connected to the audit.
    pub connected: Vec<String>,
}

impl AuditService {
    /// Creates a new audit in the EDIT state with the caller as creator.
    pub async fn create_audit(
        &self,
        ctx: &RequestContext,
        req: CreateAuditRequest,
    ) -> AppResult<Audit> {
        self.require(ctx, Capability::AuditCreate)?;
        req.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        if let Some(parent_id) = req.parent_id {
            if req.kind != AuditKind::Default {
                return Err(AppError::bad_target(
                    "Only standalone audits can be attached to a multi-audit",
                ));
            }
            let parent = self.load(parent_id).await?;
            if parent.kind != AuditKind::Multi {
                return Err(AppError::bad_target(format!(
                    "Audit {parent_id} is not a multi-audit and cannot have children"
                )));
            }
        }

        let mut audit = Audit::new(
            req.name,
            req.language,
            req.audit_type,
            req.kind,
            ctx.user.clone(),
        );
        audit.parent_id = req.parent_id;
        let audit = self.store.insert(audit).await?;

        info!(
            user_id = %ctx.user_id(),
            audit_id = %audit.id,
            kind = ?audit.kind,
            "Audit created"
        );

        Ok(audit)
    }

    /// Lists audits visible to the caller, as summaries with presence.
    ///
    /// Callers without a read-all capability only see audits they
    /// participate in, whatever else the filter says.
    pub async fn list_audits(
        &self,
        ctx: &RequestContext,
        mut filter: AuditFilter,
    ) -> AppResult<Vec<AuditSummary>> {
        self.require(ctx, Capability::AuditRead)?;
        if !self.gate.is_allowed(ctx.role(), Capability::AuditReadAll) {
            filter.participant = Some(ctx.user_id());
        }

        let audits = self.store.find_all(&filter).await?;
        Ok(audits.into_iter().map(|a| self.summarize(a)).collect())
    }

    /// Gets a single audit document.
    pub async fn get_audit(&self, ctx: &RequestContext, audit_id: AuditId) -> AppResult<Audit> {
        let audit = self.load(audit_id).await?;
        authorize(
            self.gate.as_ref(),
            &ctx.user,
            &audit,
            Capability::AuditRead,
            Capability::AuditReadAll,
        )?;
        Ok(audit)
    }

    /// Lists the children of a multi-audit.
    pub async fn get_children(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
    ) -> AppResult<Vec<AuditSummary>> {
        // Access to the parent implies access to the listing.
        self.get_audit(ctx, audit_id).await?;
        let children = self
            .store
            .find_all(&AuditFilter::children_of(audit_id))
            .await?;
        Ok(children.into_iter().map(|a| self.summarize(a)).collect())
    }

    /// Creates a retest audit derived from an existing one.
    ///
    /// The retest copies the source's findings with their retest status
    /// reset, and links back to the source via `parent_id`. An audit can
    /// have at most one retest. The assessment type can be overridden,
    /// otherwise the source's is kept.
    pub async fn create_retest(
        &self,
        ctx: &RequestContext,
        source_id: AuditId,
        audit_type: Option<String>,
    ) -> AppResult<Audit> {
        self.require(ctx, Capability::AuditCreate)?;
        let source = self.get_audit(ctx, source_id).await?;

        if source.kind == AuditKind::Retest {
            return Err(AppError::bad_target("Cannot retest a retest audit"));
        }
        let existing = self
            .store
            .find_all(&AuditFilter {
                parent_id: Some(source_id),
                kind: Some(AuditKind::Retest),
                ..AuditFilter::default()
            })
            .await?;
        if !existing.is_empty() {
            return Err(AppError::conflict(format!(
                "Audit {source_id} already has a retest audit"
            )));
        }

        let mut retest = Audit::new(
            format!("{} - Retest", source.name),
            source.language.clone(),
            audit_type.unwrap_or_else(|| source.audit_type.clone()),
            AuditKind::Retest,
            ctx.user.clone(),
        );
        retest.parent_id = Some(source_id);
        retest.scope = source.scope.clone();
        retest.findings = source
            .findings
            .iter()
            .cloned()
            .map(|mut f| {
                f.retest_status = Some(RetestStatus::Unknown);
                f.retest_description = None;
                f
            })
            .collect();

        let retest = self.store.insert(retest).await?;

        info!(
            user_id = %ctx.user_id(),
            audit_id = %retest.id,
            source_id = %source_id,
            "Retest audit created"
        );

        Ok(retest)
    }

    /// Attaches an audit to a multi-audit container.
    pub async fn update_parent(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
        parent_id: AuditId,
    ) -> AppResult<Audit> {
        let parent = self.load(parent_id).await?;
        if parent.kind != AuditKind::Multi {
            return Err(AppError::bad_target(format!(
                "Audit {parent_id} is not a multi-audit and cannot have children"
            )));
        }
        // The parent is being modified too: its child list only changes
        // while the parent itself is editable.
        let policy = self.policy().await?;
        edit_lock_check(&parent, &policy)?;

        let gate = self.gate.clone();
        let user = ctx.user.clone();
        let updated = self
            .store
            .atomic_update(
                audit_id,
                Box::new(move |audit| {
                    authorize(
                        gate.as_ref(),
                        &user,
                        audit,
                        Capability::AuditUpdate,
                        Capability::AuditUpdateAll,
                    )?;
                    if audit.kind != AuditKind::Default {
                        return Err(AppError::bad_target(
                            "Only standalone audits can be attached to a multi-audit",
                        ));
                    }
                    audit.parent_id = Some(parent_id);
                    Ok(())
                }),
            )
            .await?;

        info!(user_id = %ctx.user_id(), audit_id = %audit_id, parent_id = %parent_id, "Audit attached to parent");
        self.broadcaster
            .notify(audit_id, Some(ctx.user_id()), AuditEvent::ParentAttached);
        Ok(updated)
    }

    /// Detaches an audit from its multi-audit container.
    pub async fn delete_parent(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
    ) -> AppResult<Audit> {
        let child = self.load(audit_id).await?;
        if let Some(parent_id) = child.parent_id {
            // A parent that was deleted out from under the child no
            // longer locks anything.
            if let Some(parent) = self.store.find(parent_id).await? {
                let policy = self.policy().await?;
                edit_lock_check(&parent, &policy)?;
            }
        }

        let gate = self.gate.clone();
        let user = ctx.user.clone();
        let updated = self
            .store
            .atomic_update(
                audit_id,
                Box::new(move |audit| {
                    authorize(
                        gate.as_ref(),
                        &user,
                        audit,
                        Capability::AuditUpdate,
                        Capability::AuditUpdateAll,
                    )?;
                    audit.parent_id = None;
                    Ok(())
                }),
            )
            .await?;

        info!(user_id = %ctx.user_id(), audit_id = %audit_id, "Audit detached from parent");
        self.broadcaster
            .notify(audit_id, Some(ctx.user_id()), AuditEvent::ParentDetached);
        Ok(updated)
    }

    /// Deletes an audit. Only the creator (or a caller with delete-all)
    /// may do this, in any workflow state.
    pub async fn delete_audit(&self, ctx: &RequestContext, audit_id: AuditId) -> AppResult<()> {
        let audit = self.load(audit_id).await?;
        authorize_delete(self.gate.as_ref(), &ctx.user, &audit)?;

        self.store.delete(audit_id).await?;

        info!(user_id = %ctx.user_id(), audit_id = %audit_id, "Audit deleted");
        self.broadcaster
            .notify(audit_id, Some(ctx.user_id()), AuditEvent::AuditDeleted);
        Ok(())
    }

    /// Usernames currently connected to an audit.
    pub async fn connected_users(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
    ) -> AppResult<Vec<String>> {
        self.require(ctx, Capability::UsersConnected)?;
        self.get_audit(ctx, audit_id).await?;
        Ok(self.presence.connected_usernames(audit_id))
    }

    fn summarize(&self, audit: Audit) -> AuditSummary {
        let connected = self.presence.connected_usernames(audit.id);
        AuditSummary {
            id: audit.id,
            name: audit.name,
            language: audit.language,
            audit_type: audit.audit_type,
            kind: audit.kind,
            parent_id: audit.parent_id,
            state: audit.state,
            creator_username: audit.creator.username,
            created_at: audit.created_at,
            connected,
        }
    }
}
