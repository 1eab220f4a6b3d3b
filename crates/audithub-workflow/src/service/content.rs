//! Content mutations: general info, scope, findings, sections, sorting.
//!
//! Every operation here goes through [`AuditService::apply_content_update`],
//! which runs the authorization, the edit lock and the mutation itself
//! atomically against the authoritative document. A rejected validation
//! leaves the audit byte-for-byte untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use audithub_core::error::AppError;
use audithub_core::events::AuditEvent;
use audithub_core::result::AppResult;
use audithub_core::types::{AuditId, FindingId, SectionId, TemplateId};
use audithub_entity::audit::{Audit, CompanyRef, FindingSorting, ScopeItem};
use audithub_entity::custom_field::CustomField;
use audithub_entity::finding::{Finding, FindingStatus, RetestStatus};
use audithub_store::store::AuditMutation;

use crate::comments::cascade_finding_comments;
use crate::context::RequestContext;
use crate::ordering;
use crate::policy::Capability;
use crate::roles::{apply_role_update, validate_role_update, RoleUpdate};
use crate::state;

use super::{authorize, AuditService};

/// A partial update to the audit's general information. Top-level `None`
/// means "leave unchanged"; the double options carry an explicit clear.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct GeneralUpdate {
    pub name: Option<String>,
    pub language: Option<String>,
    pub date: Option<Option<DateTime<Utc>>>,
    pub date_start: Option<Option<DateTime<Utc>>>,
    pub date_end: Option<Option<DateTime<Utc>>>,
    pub client: Option<Option<String>>,
    pub company: Option<Option<CompanyRef>>,
    pub template: Option<Option<TemplateId>>,
    pub custom_fields: Option<Vec<CustomField>>,
    /// Replacement collaborator list.
    #[serde(skip)]
    pub collaborators: Option<Vec<audithub_entity::user::UserIdentity>>,
    /// Replacement reviewer list.
    #[serde(skip)]
    pub reviewers: Option<Vec<audithub_entity::user::UserIdentity>>,
}

/// A partial update to a finding. `None` leaves the field unchanged.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct FindingPatch {
    pub title: Option<String>,
    pub vuln_type: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub observation: Option<Option<String>>,
    pub remediation: Option<Option<String>>,
    pub poc: Option<Option<String>>,
    pub status: Option<FindingStatus>,
    pub category: Option<Option<String>>,
    pub custom_fields: Option<Vec<CustomField>>,
    pub references: Option<Vec<String>>,
    pub scope: Option<Option<String>>,
    pub cvssv3: Option<Option<String>>,
    pub cvssv4: Option<Option<String>>,
    pub remediation_complexity: Option<Option<u8>>,
    pub priority: Option<Option<u8>>,
    pub retest_status: Option<Option<RetestStatus>>,
    pub retest_description: Option<Option<String>>,
}

impl FindingPatch {
    fn apply(self, finding: &mut Finding) {
        if let Some(v) = self.title {
            finding.title = v;
        }
        if let Some(v) = self.vuln_type {
            finding.vuln_type = v;
        }
        if let Some(v) = self.description {
            finding.description = v;
        }
        if let Some(v) = self.observation {
            finding.observation = v;
        }
        if let Some(v) = self.remediation {
            finding.remediation = v;
        }
        if let Some(v) = self.poc {
            finding.poc = v;
        }
        if let Some(v) = self.status {
            finding.status = v;
        }
        if let Some(v) = self.category {
            finding.category = v;
        }
        if let Some(v) = self.custom_fields {
            finding.custom_fields = v;
        }
        if let Some(v) = self.references {
            finding.references = v;
        }
        if let Some(v) = self.scope {
            finding.scope = v;
        }
        if let Some(v) = self.cvssv3 {
            finding.cvssv3 = v;
        }
        if let Some(v) = self.cvssv4 {
            finding.cvssv4 = v;
        }
        if let Some(v) = self.remediation_complexity {
            finding.remediation_complexity = v;
        }
        if let Some(v) = self.priority {
            finding.priority = v;
        }
        if let Some(v) = self.retest_status {
            finding.retest_status = v;
        }
        if let Some(v) = self.retest_description {
            finding.retest_description = v;
        }
    }
}

/// A partial update to a report section's content.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SectionUpdate {
    pub custom_fields: Option<Vec<CustomField>>,
    pub text: Option<Option<String>>,
}

impl AuditService {
    /// Updates the audit's general information and participant roles.
    pub async fn update_general(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
        update: GeneralUpdate,
    ) -> AppResult<Audit> {
        let updated = self
            .apply_content_update(ctx, audit_id, AuditEvent::GeneralUpdated, move |audit| {
                let roles = RoleUpdate {
                    collaborators: update.collaborators,
                    reviewers: update.reviewers,
                };
                if !roles.is_empty() {
                    validate_role_update(audit, &roles)?;
                }

                if let Some(name) = update.name {
                    if name.trim().is_empty() {
                        return Err(AppError::validation("Audit name cannot be empty"));
                    }
                    audit.name = name;
                }
                if let Some(language) = update.language {
                    audit.language = language;
                }
                if let Some(date) = update.date {
                    audit.date = date;
                }
                if let Some(date_start) = update.date_start {
                    audit.date_start = date_start;
                }
                if let Some(date_end) = update.date_end {
                    audit.date_end = date_end;
                }
                if let Some(client) = update.client {
                    audit.client = client;
                }
                if let Some(company) = update.company {
                    audit.company = company;
                }
                if let Some(template) = update.template {
                    audit.template = template;
                }
                if let Some(custom_fields) = update.custom_fields {
                    audit.custom_fields = custom_fields;
                }
                if !roles.is_empty() {
                    apply_role_update(audit, roles);
                }
                Ok(())
            })
            .await?;

        info!(user_id = %ctx.user_id(), audit_id = %audit_id, "Audit general information updated");
        Ok(updated)
    }

    /// Replaces the audit's scope.
    pub async fn update_scope(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
        scope: Vec<ScopeItem>,
    ) -> AppResult<Audit> {
        let updated = self
            .apply_content_update(ctx, audit_id, AuditEvent::ScopeUpdated, move |audit| {
                audit.scope = scope;
                Ok(())
            })
            .await?;

        info!(user_id = %ctx.user_id(), audit_id = %audit_id, "Audit scope updated");
        Ok(updated)
    }

    /// Appends a finding to the audit.
    pub async fn create_finding(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
        finding: Finding,
    ) -> AppResult<Audit> {
        if finding.title.trim().is_empty() {
            return Err(AppError::validation("Finding title is required"));
        }
        let finding_id = finding.id;

        let updated = self
            .apply_content_update(ctx, audit_id, AuditEvent::FindingCreated, move |audit| {
                if audit.finding(finding.id).is_some() {
                    return Err(AppError::conflict(format!(
                        "A finding with id {} already exists on the audit",
                        finding.id
                    )));
                }
                audit.findings.push(finding);
                Ok(())
            })
            .await?;

        info!(user_id = %ctx.user_id(), audit_id = %audit_id, finding_id = %finding_id, "Finding created");
        Ok(updated)
    }

    /// Gets a single finding.
    pub async fn get_finding(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
        finding_id: FindingId,
    ) -> AppResult<Finding> {
        let audit = self.get_audit(ctx, audit_id).await?;
        audit
            .finding(finding_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Finding {finding_id} was not found")))
    }

    /// Applies a partial update to a finding.
    pub async fn update_finding(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
        finding_id: FindingId,
        patch: FindingPatch,
    ) -> AppResult<Audit> {
        let updated = self
            .apply_content_update(ctx, audit_id, AuditEvent::FindingUpdated, move |audit| {
                let finding = audit.finding_mut(finding_id).ok_or_else(|| {
                    AppError::not_found(format!("Finding {finding_id} was not found"))
                })?;
                if let Some(title) = &patch.title {
                    if title.trim().is_empty() {
                        return Err(AppError::validation("Finding title cannot be empty"));
                    }
                }
                patch.apply(finding);
                Ok(())
            })
            .await?;

        info!(user_id = %ctx.user_id(), audit_id = %audit_id, finding_id = %finding_id, "Finding updated");
        Ok(updated)
    }

    /// Deletes a finding. Comments anchored to it are removed with it.
    pub async fn delete_finding(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
        finding_id: FindingId,
    ) -> AppResult<Audit> {
        let updated = self
            .apply_content_update(ctx, audit_id, AuditEvent::FindingDeleted, move |audit| {
                let before = audit.findings.len();
                audit.findings.retain(|f| f.id != finding_id);
                if audit.findings.len() == before {
                    return Err(AppError::not_found(format!(
                        "Finding {finding_id} was not found"
                    )));
                }
                cascade_finding_comments(audit, finding_id);
                Ok(())
            })
            .await?;

        info!(user_id = %ctx.user_id(), audit_id = %audit_id, finding_id = %finding_id, "Finding deleted");
        Ok(updated)
    }

    /// Gets a single report section.
    pub async fn get_section(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
        section_id: SectionId,
    ) -> AppResult<audithub_entity::section::Section> {
        let audit = self.get_audit(ctx, audit_id).await?;
        audit
            .section(section_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Section {section_id} was not found")))
    }

    /// Updates a report section's content. Sections cannot be created or
    /// deleted here; their set is fixed by the audit type.
    pub async fn update_section(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
        section_id: SectionId,
        update: SectionUpdate,
    ) -> AppResult<Audit> {
        let updated = self
            .apply_content_update(ctx, audit_id, AuditEvent::SectionUpdated, move |audit| {
                let section = audit.section_mut(section_id).ok_or_else(|| {
                    AppError::not_found(format!("Section {section_id} was not found"))
                })?;
                if let Some(custom_fields) = update.custom_fields {
                    section.custom_fields = custom_fields;
                }
                if let Some(text) = update.text {
                    section.text = text;
                }
                Ok(())
            })
            .await?;

        info!(user_id = %ctx.user_id(), audit_id = %audit_id, section_id = %section_id, "Section updated");
        Ok(updated)
    }

    /// Replaces the finding sort strategy.
    pub async fn update_sort(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
        sorting: FindingSorting,
    ) -> AppResult<Audit> {
        let updated = self
            .apply_content_update(
                ctx,
                audit_id,
                AuditEvent::SortStrategyUpdated,
                move |audit| {
                    ordering::set_sort_strategy(audit, sorting);
                    Ok(())
                },
            )
            .await?;

        info!(user_id = %ctx.user_id(), audit_id = %audit_id, "Finding sort strategy updated");
        Ok(updated)
    }

    /// Moves a finding to a new position, switching to manual ordering.
    pub async fn move_finding_position(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
        old_index: usize,
        new_index: usize,
    ) -> AppResult<Audit> {
        let updated = self
            .apply_content_update(ctx, audit_id, AuditEvent::FindingsReordered, move |audit| {
                ordering::move_finding(audit, old_index, new_index)
            })
            .await?;

        info!(
            user_id = %ctx.user_id(),
            audit_id = %audit_id,
            from = old_index,
            to = new_index,
            "Finding moved"
        );
        Ok(updated)
    }

    /// Runs a content mutation under the full gauntlet: authorization,
    /// edit lock, the mutation itself, then approval invalidation. All
    /// of it inside the store's atomic update, then one change
    /// notification on success.
    async fn apply_content_update(
        &self,
        ctx: &RequestContext,
        audit_id: AuditId,
        event: AuditEvent,
        apply: impl FnOnce(&mut Audit) -> AppResult<()> + Send + 'static,
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
            state::edit_lock_check(audit, &policy)?;
            apply(audit)?;
            state::apply_approval_side_effects(audit, &policy);
            Ok(())
        });

        let updated = self.store.atomic_update(audit_id, mutation).await?;
        self.broadcaster.notify(audit_id, Some(ctx.user_id()), event);
        Ok(updated)
    }
}
