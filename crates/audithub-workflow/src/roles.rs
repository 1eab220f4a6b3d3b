//! Participant role management.
//!
//! Creator, collaborators and reviewers of an audit must stay disjoint
//! where it matters for review integrity: nobody may review what they
//! can edit. Proposed reviewers are validated against the merged picture
//! of the update, proposed collaborators additionally against the
//! standing reviewer list, so a single request cannot move a user
//! straight from one side of the review to the other.

use audithub_core::error::AppError;
use audithub_core::result::AppResult;
use audithub_core::types::UserId;
use audithub_entity::audit::Audit;
use audithub_entity::user::UserIdentity;

/// Replacement lists for the audit's participant roles. `None` leaves
/// the corresponding list untouched.
#[derive(Debug, Default, Clone)]
pub struct RoleUpdate {
    pub collaborators: Option<Vec<UserIdentity>>,
    pub reviewers: Option<Vec<UserIdentity>>,
}

impl RoleUpdate {
    pub fn is_empty(&self) -> bool {
        self.collaborators.is_none() && self.reviewers.is_none()
    }
}

/// Reject any proposed assignment that would let a user review an audit
/// they can also edit.
pub fn validate_role_update(audit: &Audit, update: &RoleUpdate) -> AppResult<()> {
    let reviewers: &[UserIdentity] = update
        .reviewers
        .as_deref()
        .unwrap_or(&audit.reviewers);
    let collaborators: &[UserIdentity] = update
        .collaborators
        .as_deref()
        .unwrap_or(&audit.collaborators);

    for reviewer in reviewers {
        if reviewer.id == audit.creator.id {
            return Err(AppError::role_conflict(
                "The creator of the audit cannot be assigned as a reviewer",
                &reviewer.username,
            ));
        }
        if collaborators.iter().any(|c| c.id == reviewer.id) {
            return Err(AppError::role_conflict(
                "A collaborator of the audit cannot be assigned as a reviewer",
                &reviewer.username,
            ));
        }
    }
    if let Some(proposed) = &update.collaborators {
        // Checked against the current reviewer list even when the request
        // replaces it: a reviewer must be unassigned first before they can
        // come back as a collaborator.
        for collaborator in proposed {
            if audit.reviewers.iter().any(|r| r.id == collaborator.id) {
                return Err(AppError::role_conflict(
                    "A reviewer of the audit cannot be assigned as a collaborator",
                    &collaborator.username,
                ));
            }
        }
    }
    Ok(())
}

/// Apply a validated role update, pruning approvals that the new role
/// assignment invalidates.
pub fn apply_role_update(audit: &mut Audit, update: RoleUpdate) {
    if let Some(collaborators) = update.collaborators {
        // A user promoted to collaborator loses any standing approval.
        let editor_ids: Vec<UserId> = collaborators.iter().map(|c| c.id).collect();
        audit
            .approvals
            .retain(|a| !editor_ids.contains(&a.reviewer_id));
        audit.collaborators = collaborators;
    }
    if let Some(reviewers) = update.reviewers {
        // Approvals from users no longer on the reviewer list are stale.
        let reviewer_ids: Vec<UserId> = reviewers.iter().map(|r| r.id).collect();
        audit
            .approvals
            .retain(|a| reviewer_ids.contains(&a.reviewer_id));
        audit.reviewers = reviewers;
    }
}
