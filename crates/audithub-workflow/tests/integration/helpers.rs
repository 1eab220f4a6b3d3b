//! Shared test helpers for integration tests.

use std::sync::Arc;

use async_trait::async_trait;

use audithub_core::result::AppResult;
use audithub_core::review::ReviewPolicy;
use audithub_core::types::AuditId;
use audithub_entity::audit::{Audit, AuditKind};
use audithub_entity::user::{UserIdentity, UserRole};
use audithub_realtime::broadcaster::ChangeBroadcaster;
use audithub_realtime::presence::PresenceTracker;
use audithub_store::memory::MemoryAuditStore;
use audithub_workflow::report::ReportGenerator;
use audithub_workflow::service::{AuditService, CreateAuditRequest, GeneralUpdate};
use audithub_workflow::{RequestContext, RolePolicies, StaticSettings};

/// A report generator that renders a fixed document.
pub struct FakeReportGenerator;

#[async_trait]
impl ReportGenerator for FakeReportGenerator {
    async fn generate_doc(&self, _audit: &Audit) -> AppResult<Vec<u8>> {
        Ok(b"PK\x03\x04 fake docx".to_vec())
    }
}

/// Fully wired workflow engine backed by the in-memory store.
pub struct TestApp {
    pub service: AuditService,
    pub store: Arc<MemoryAuditStore>,
    pub settings: Arc<StaticSettings>,
    pub broadcaster: Arc<ChangeBroadcaster>,
    pub presence: Arc<PresenceTracker>,
}

impl TestApp {
    /// Create a test engine with the given review policy.
    pub fn with_policy(policy: ReviewPolicy) -> Self {
        let store = Arc::new(MemoryAuditStore::new());
        let settings = Arc::new(StaticSettings::new(policy));
        let broadcaster = Arc::new(ChangeBroadcaster::new(16));
        let presence = Arc::new(PresenceTracker::new());

        let service = AuditService::new(
            store.clone(),
            Arc::new(RolePolicies::new()),
            settings.clone(),
            Arc::new(FakeReportGenerator),
            broadcaster.clone(),
            presence.clone(),
        );

        Self {
            service,
            store,
            settings,
            broadcaster,
            presence,
        }
    }

    /// Engine with the review workflow enabled and a threshold of
    /// `min_reviewers`.
    pub fn with_reviews(min_reviewers: u32) -> Self {
        Self::with_policy(ReviewPolicy {
            enabled: true,
            min_reviewers,
            ..ReviewPolicy::default()
        })
    }

    /// Engine with reviews disabled entirely.
    pub fn without_reviews() -> Self {
        Self::with_policy(ReviewPolicy::default())
    }

    /// Create an audit owned by `creator`, with the given reviewers
    /// already assigned.
    pub async fn seed_audit(
        &self,
        creator: &RequestContext,
        reviewers: &[UserIdentity],
    ) -> AuditId {
        let audit = self
            .service
            .create_audit(
                creator,
                CreateAuditRequest {
                    name: "Q3 Web Assessment".into(),
                    language: "en".into(),
                    audit_type: "Web Application".into(),
                    kind: AuditKind::Default,
                    parent_id: None,
                },
            )
            .await
            .expect("audit creation should succeed");

        if !reviewers.is_empty() {
            self.service
                .update_general(
                    creator,
                    audit.id,
                    GeneralUpdate {
                        reviewers: Some(reviewers.to_vec()),
                        ..GeneralUpdate::default()
                    },
                )
                .await
                .expect("reviewer assignment should succeed");
        }
        audit.id
    }
}

/// A request context for a fresh user with the given name and role.
pub fn ctx(username: &str, role: UserRole) -> RequestContext {
    RequestContext::new(UserIdentity::new(
        audithub_core::types::UserId::new(),
        username,
        username,
        "Tester",
        role,
    ))
}

pub fn user_ctx(username: &str) -> RequestContext {
    ctx(username, UserRole::User)
}

pub fn reviewer_ctx(username: &str) -> RequestContext {
    ctx(username, UserRole::Reviewer)
}

pub fn admin_ctx(username: &str) -> RequestContext {
    ctx(username, UserRole::Admin)
}
