//! The approval ledger.
//!
//! Each entry is a denormalized snapshot of the reviewer's identity at
//! approval time, so the ledger stays readable even after the user
//! record changes. At most one entry per reviewer.

use audithub_core::error::AppError;
use audithub_core::result::AppResult;
use audithub_core::types::UserId;
use audithub_entity::audit::{Approval, Audit};
use audithub_entity::user::UserIdentity;

/// Flip the caller's approval: add it when absent, withdraw it when
/// present. The caller must be an assigned reviewer and the audit must
/// be in an approvable state.
pub fn toggle(audit: &mut Audit, caller: &UserIdentity) -> AppResult<()> {
    if !audit.state.is_approvable() {
        return Err(AppError::invalid_state(
            "The audit is not in the REVIEW state and therefore cannot be approved",
        ));
    }
    if !audit.is_reviewer(caller.id) {
        return Err(AppError::permission_denied(
            "Only an assigned reviewer of the audit can approve it",
        ));
    }
    if audit.has_approval_from(caller.id) {
        audit.approvals.retain(|a| a.reviewer_id != caller.id);
    } else {
        audit.approvals.push(Approval::snapshot_of(caller));
    }
    Ok(())
}

/// Remove a reviewer from the audit entirely: both their assignment and
/// any standing approval. Used when a user leaves the deployment.
///
/// Callers re-run the threshold evaluation afterwards, since losing an
/// approval can demote an APPROVED audit.
pub fn remove_reviewer(audit: &mut Audit, reviewer_id: UserId) {
    audit.reviewers.retain(|r| r.id != reviewer_id);
    audit.approvals.retain(|a| a.reviewer_id != reviewer_id);
}
