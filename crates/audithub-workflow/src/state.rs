//! The workflow state machine.
//!
//! States move `EDIT → REVIEW → APPROVED`, with `REVIEW → EDIT` and
//! `APPROVED → REVIEW` reachable. The APPROVED state is derived from the
//! approval count, never set directly: after every change to the ledger,
//! [`evaluate_approval_threshold`] promotes or demotes the audit.
//!
//! All functions here are pure over the document and a policy snapshot;
//! the service runs them inside the store's atomic update so a failing
//! check aborts the whole write.

use audithub_core::error::AppError;
use audithub_core::result::AppResult;
use audithub_core::review::ReviewPolicy;
use audithub_core::types::UserId;
use audithub_entity::audit::{Audit, AuditState};

/// The single cross-cutting edit-lock gate.
///
/// Every content mutation (general info, scope, findings, sections, sort
/// order, position) must pass this check. Denial rejects the whole
/// request so callers can tell "forbidden" apart from "no fields given".
pub fn edit_lock_check(audit: &Audit, policy: &ReviewPolicy) -> AppResult<()> {
    if policy.enabled && audit.state != AuditState::Edit {
        return Err(AppError::invalid_transition(
            "The audit is not in the EDIT state and therefore cannot be edited",
        ));
    }
    Ok(())
}

/// Submit the audit for review. Valid only from EDIT.
pub fn request_review(audit: &mut Audit, policy: &ReviewPolicy) -> AppResult<()> {
    if !policy.enabled {
        return Err(AppError::policy_disabled("Audit reviews are not enabled"));
    }
    if audit.state != AuditState::Edit {
        return Err(AppError::invalid_transition(format!(
            "Cannot request review from the {} state",
            audit.state
        )));
    }
    audit.state = AuditState::Review;
    Ok(())
}

/// Pull the audit back to EDIT. Valid from REVIEW or APPROVED.
///
/// Only the caller's own approval is withdrawn; other reviewers keep
/// theirs so a transient revert does not force everyone to re-approve.
pub fn revert_to_edit(audit: &mut Audit, caller: UserId, policy: &ReviewPolicy) -> AppResult<()> {
    if !policy.enabled {
        return Err(AppError::policy_disabled("Audit reviews are not enabled"));
    }
    if !audit.state.is_approvable() {
        return Err(AppError::invalid_transition(format!(
            "Cannot revert to edit from the {} state",
            audit.state
        )));
    }
    audit.state = AuditState::Edit;
    audit.approvals.retain(|a| a.reviewer_id != caller);
    Ok(())
}

/// Invalidate existing sign-offs after an accepted content mutation,
/// when the policy says content changes force re-review.
pub fn apply_approval_side_effects(audit: &mut Audit, policy: &ReviewPolicy) {
    if policy.enabled && policy.remove_approvals_upon_update {
        audit.approvals.clear();
    }
}

/// Re-derive the REVIEW / APPROVED state from the approval count.
///
/// Returns whether the state changed.
pub fn evaluate_approval_threshold(audit: &mut Audit, policy: &ReviewPolicy) -> bool {
    let required = policy.required_approvals();
    match audit.state {
        AuditState::Review if audit.approvals.len() >= required => {
            audit.state = AuditState::Approved;
            true
        }
        AuditState::Approved if audit.approvals.len() < required => {
            audit.state = AuditState::Review;
            true
        }
        _ => false,
    }
}

/// The export gate: with mandatory review, only APPROVED audits render.
pub fn generate_gate(audit: &Audit, policy: &ReviewPolicy) -> AppResult<()> {
    if policy.enabled && policy.mandatory_review && audit.state != AuditState::Approved {
        return Err(AppError::not_approved(
            "Audit was not approved and therefore cannot be exported",
        ));
    }
    Ok(())
}
