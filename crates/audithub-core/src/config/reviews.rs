//! Review policy configuration defaults.

use serde::{Deserialize, Serialize};

use crate::review::ReviewPolicy;

/// Review workflow configuration section.
///
/// Mirrors [`ReviewPolicy`] field for field; this is the file-backed shape
/// consumed by the static settings provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewsConfig {
    /// Whether the review workflow is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Whether export requires the APPROVED state.
    #[serde(default)]
    pub mandatory_review: bool,
    /// Number of distinct reviewer approvals required.
    #[serde(default = "default_min_reviewers")]
    pub min_reviewers: u32,
    /// Whether content changes clear all existing approvals.
    #[serde(default)]
    pub remove_approvals_upon_update: bool,
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            mandatory_review: false,
            min_reviewers: default_min_reviewers(),
            remove_approvals_upon_update: false,
        }
    }
}

impl From<&ReviewsConfig> for ReviewPolicy {
    fn from(cfg: &ReviewsConfig) -> Self {
        Self {
            enabled: cfg.enabled,
            mandatory_review: cfg.mandatory_review,
            min_reviewers: cfg.min_reviewers.max(1),
            remove_approvals_upon_update: cfg.remove_approvals_upon_update,
        }
    }
}

fn default_min_reviewers() -> u32 {
    1
}
