//! Review policy value type and the settings collaborator trait.
//!
//! The review policy is deployment configuration owned by an external
//! settings service. The core never persists it: every operation fetches
//! one snapshot up front and applies it consistently for the whole
//! operation, even if an administrator changes the settings mid-request.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// Snapshot of the deployment's review policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPolicy {
    /// Whether the review workflow is enabled at all. When disabled, the
    /// edit lock never applies and approvals cannot be given.
    pub enabled: bool,
    /// Whether an audit must be APPROVED before it can be exported.
    pub mandatory_review: bool,
    /// Number of distinct reviewer approvals required for the APPROVED
    /// state. Values below 1 are treated as 1.
    pub min_reviewers: u32,
    /// Whether any content change invalidates all existing approvals.
    pub remove_approvals_upon_update: bool,
}

impl ReviewPolicy {
    /// The effective approval threshold, clamped to at least one reviewer.
    pub fn required_approvals(&self) -> usize {
        self.min_reviewers.max(1) as usize
    }
}

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            mandatory_review: false,
            min_reviewers: 1,
            remove_approvals_upon_update: false,
        }
    }
}

/// Collaborator trait for the external settings service.
///
/// Implementations return the current policy; the bundled static provider
/// serves a snapshot loaded from configuration.
#[async_trait]
pub trait SettingsProvider: Send + Sync + 'static {
    /// Fetch the current review policy.
    async fn review_policy(&self) -> AppResult<ReviewPolicy>;
}
