//! Static settings provider backed by the configuration file.

use std::sync::RwLock;

use async_trait::async_trait;

use audithub_core::config::reviews::ReviewsConfig;
use audithub_core::result::AppResult;
use audithub_core::review::{ReviewPolicy, SettingsProvider};

/// [`SettingsProvider`] serving a policy snapshot loaded from
/// configuration.
///
/// Deployments with a persistent settings service swap this out; tests
/// use `set` to simulate an administrator changing the policy between
/// operations.
#[derive(Debug)]
pub struct StaticSettings {
    policy: RwLock<ReviewPolicy>,
}

impl StaticSettings {
    /// Create a provider serving the given policy.
    pub fn new(policy: ReviewPolicy) -> Self {
        Self {
            policy: RwLock::new(policy),
        }
    }

    /// Create a provider from the configuration section.
    pub fn from_config(cfg: &ReviewsConfig) -> Self {
        Self::new(ReviewPolicy::from(cfg))
    }

    /// Replace the served policy.
    pub fn set(&self, policy: ReviewPolicy) {
        let mut guard = match self.policy.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = policy;
    }
}

impl Default for StaticSettings {
    fn default() -> Self {
        Self::new(ReviewPolicy::default())
    }
}

#[async_trait]
impl SettingsProvider for StaticSettings {
    async fn review_policy(&self) -> AppResult<ReviewPolicy> {
        let guard = match self.policy.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Ok(*guard)
    }
}
