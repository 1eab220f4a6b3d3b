//! Finding order within an audit.
//!
//! The findings vector is the authoritative order. A manual move is a
//! splice (remove then insert) so every element between the two indices
//! shifts by exactly one position, and it switches the audit to manual
//! ordering so a later automatic re-sort does not undo it.

use audithub_core::error::AppError;
use audithub_core::result::AppResult;
use audithub_entity::audit::{Audit, FindingSorting, OrderingMode};

/// Move the finding at `old_index` to `new_index`.
pub fn move_finding(audit: &mut Audit, old_index: usize, new_index: usize) -> AppResult<()> {
    let len = audit.findings.len();
    if old_index >= len {
        return Err(AppError::out_of_range(format!(
            "Old finding position {old_index} is out of range (audit has {len} findings)"
        )));
    }
    if new_index >= len {
        return Err(AppError::out_of_range(format!(
            "New finding position {new_index} is out of range (audit has {len} findings)"
        )));
    }
    if old_index == new_index {
        return Ok(());
    }
    let finding = audit.findings.remove(old_index);
    audit.findings.insert(new_index, finding);
    audit.sort_findings.mode = OrderingMode::Manual;
    Ok(())
}

/// Replace the audit's sorting strategy.
pub fn set_sort_strategy(audit: &mut Audit, sorting: FindingSorting) {
    audit.sort_findings = sorting;
}
