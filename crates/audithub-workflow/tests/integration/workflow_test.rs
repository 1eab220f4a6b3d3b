//! Lifecycle and content mutation tests.

use audithub_core::error::ErrorKind;
use audithub_core::events::AuditEvent;
use audithub_entity::audit::{AuditKind, AuditState, ScopeItem};
use audithub_entity::finding::Finding;
use audithub_store::filter::AuditFilter;
use audithub_workflow::service::{CreateAuditRequest, GeneralUpdate};

use crate::helpers::{admin_ctx, reviewer_ctx, user_ctx, TestApp};

#[tokio::test]
async fn test_create_audit_starts_in_edit_state() {
    let app = TestApp::with_reviews(1);
    let creator = user_ctx("alice");

    let audit = app
        .service
        .create_audit(
            &creator,
            CreateAuditRequest {
                name: "Internal Network".into(),
                language: "en".into(),
                audit_type: "Network".into(),
                kind: AuditKind::Default,
                parent_id: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(audit.state, AuditState::Edit);
    assert_eq!(audit.creator.id, creator.user_id());
    assert!(audit.approvals.is_empty());
}

#[tokio::test]
async fn test_create_audit_rejects_empty_name() {
    let app = TestApp::with_reviews(1);
    let err = app
        .service
        .create_audit(
            &user_ctx("alice"),
            CreateAuditRequest {
                name: "".into(),
                language: "en".into(),
                audit_type: "Network".into(),
                kind: AuditKind::Default,
                parent_id: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_listing_is_scoped_to_participants() {
    let app = TestApp::with_reviews(1);
    let alice = user_ctx("alice");
    let bob = user_ctx("bob");
    let admin = admin_ctx("root");

    app.seed_audit(&alice, &[]).await;

    let visible_to_alice = app.service.list_audits(&alice, AuditFilter::any()).await.unwrap();
    assert_eq!(visible_to_alice.len(), 1);

    let visible_to_bob = app.service.list_audits(&bob, AuditFilter::any()).await.unwrap();
    assert!(visible_to_bob.is_empty());

    // read-all sees everything
    let visible_to_admin = app.service.list_audits(&admin, AuditFilter::any()).await.unwrap();
    assert_eq!(visible_to_admin.len(), 1);
}

#[tokio::test]
async fn test_non_participant_cannot_read_audit() {
    let app = TestApp::with_reviews(1);
    let alice = user_ctx("alice");
    let audit_id = app.seed_audit(&alice, &[]).await;

    let err = app
        .service
        .get_audit(&user_ctx("mallory"), audit_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::PermissionDenied);
}

#[tokio::test]
async fn test_role_disjointness_enforced_on_update() {
    let app = TestApp::with_reviews(1);
    let alice = user_ctx("alice");
    let audit_id = app.seed_audit(&alice, &[]).await;

    // The creator cannot be made a reviewer of their own audit.
    let err = app
        .service
        .update_general(
            &alice,
            audit_id,
            GeneralUpdate {
                reviewers: Some(vec![alice.user.clone()]),
                ..GeneralUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::RoleConflict);
    assert_eq!(err.subject.as_deref(), Some("alice"));

    // A failed update must leave the document untouched.
    let audit = app.service.get_audit(&alice, audit_id).await.unwrap();
    assert!(audit.reviewers.is_empty());
}

#[tokio::test]
async fn test_content_updates_denied_outside_edit_state() {
    let app = TestApp::with_reviews(1);
    let alice = user_ctx("alice");
    let rev = reviewer_ctx("rita");
    let audit_id = app.seed_audit(&alice, &[rev.user.clone()]).await;

    app.service.request_review(&alice, audit_id).await.unwrap();

    let err = app
        .service
        .update_scope(&alice, audit_id, vec![ScopeItem::named("DMZ")])
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidTransition);

    let audit = app.service.get_audit(&alice, audit_id).await.unwrap();
    assert!(audit.scope.is_empty());
}

#[tokio::test]
async fn test_content_updates_always_allowed_when_reviews_disabled() {
    let app = TestApp::without_reviews();
    let alice = user_ctx("alice");
    let audit_id = app.seed_audit(&alice, &[]).await;

    let audit = app
        .service
        .update_scope(&alice, audit_id, vec![ScopeItem::named("DMZ")])
        .await
        .unwrap();
    assert_eq!(audit.scope.len(), 1);
}

#[tokio::test]
async fn test_finding_crud_and_comment_cascade() {
    let app = TestApp::with_reviews(1);
    let alice = user_ctx("alice");
    let audit_id = app.seed_audit(&alice, &[]).await;

    let finding = Finding::titled("SQL injection in login form");
    let finding_id = finding.id;
    app.service
        .create_finding(&alice, audit_id, finding)
        .await
        .unwrap();

    let fetched = app
        .service
        .get_finding(&alice, audit_id, finding_id)
        .await
        .unwrap();
    assert_eq!(fetched.title, "SQL injection in login form");

    let comment = audithub_workflow::NewComment {
        id: None,
        finding_id: Some(finding_id),
        section_id: None,
        field_name: "description".into(),
        author: alice.user_id(),
        text: "add the payload".into(),
    };
    app.service
        .create_comment(&alice, audit_id, comment)
        .await
        .unwrap();

    let audit = app
        .service
        .delete_finding(&alice, audit_id, finding_id)
        .await
        .unwrap();
    assert!(audit.findings.is_empty());
    assert!(audit.comments.is_empty(), "comments must not outlive their finding");
}

#[tokio::test]
async fn test_move_finding_and_inverse_restores_order() {
    let app = TestApp::with_reviews(1);
    let alice = user_ctx("alice");
    let audit_id = app.seed_audit(&alice, &[]).await;

    for title in ["first", "second", "third"] {
        app.service
            .create_finding(&alice, audit_id, Finding::titled(title))
            .await
            .unwrap();
    }

    let moved = app
        .service
        .move_finding_position(&alice, audit_id, 0, 2)
        .await
        .unwrap();
    let titles: Vec<_> = moved.findings.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(titles, vec!["second", "third", "first"]);

    let restored = app
        .service
        .move_finding_position(&alice, audit_id, 2, 0)
        .await
        .unwrap();
    let titles: Vec<_> = restored.findings.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);

    let err = app
        .service
        .move_finding_position(&alice, audit_id, 5, 0)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::OutOfRange);
}

#[tokio::test]
async fn test_only_creator_can_delete() {
    let app = TestApp::with_reviews(1);
    let alice = user_ctx("alice");
    let bob = user_ctx("bob");
    let audit_id = app.seed_audit(&alice, &[]).await;

    let err = app.service.delete_audit(&bob, audit_id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::PermissionDenied);

    app.service.delete_audit(&alice, audit_id).await.unwrap();
    let err = app.service.get_audit(&alice, audit_id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_retest_creation_and_duplicate_conflict() {
    let app = TestApp::with_reviews(1);
    let alice = user_ctx("alice");
    let audit_id = app.seed_audit(&alice, &[]).await;
    app.service
        .create_finding(&alice, audit_id, Finding::titled("XSS"))
        .await
        .unwrap();

    let retest = app
        .service
        .create_retest(&alice, audit_id, Some("Web Retest".into()))
        .await
        .unwrap();
    assert_eq!(retest.kind, AuditKind::Retest);
    assert_eq!(retest.audit_type, "Web Retest");
    assert_eq!(retest.parent_id, Some(audit_id));
    assert_eq!(retest.findings.len(), 1);
    assert!(retest.findings[0].retest_status.is_some());

    let err = app
        .service
        .create_retest(&alice, audit_id, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn test_parent_attachment_requires_multi_audit() {
    let app = TestApp::with_reviews(1);
    let alice = user_ctx("alice");
    let audit_id = app.seed_audit(&alice, &[]).await;

    let plain = app
        .service
        .create_audit(
            &alice,
            CreateAuditRequest {
                name: "Not a container".into(),
                language: "en".into(),
                audit_type: "Web Application".into(),
                kind: AuditKind::Default,
                parent_id: None,
            },
        )
        .await
        .unwrap();

    let err = app
        .service
        .update_parent(&alice, audit_id, plain.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::BadTarget);

    let multi = app
        .service
        .create_audit(
            &alice,
            CreateAuditRequest {
                name: "Yearly program".into(),
                language: "en".into(),
                audit_type: "Web Application".into(),
                kind: AuditKind::Multi,
                parent_id: None,
            },
        )
        .await
        .unwrap();

    let attached = app
        .service
        .update_parent(&alice, audit_id, multi.id)
        .await
        .unwrap();
    assert_eq!(attached.parent_id, Some(multi.id));

    let children = app.service.get_children(&alice, multi.id).await.unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, audit_id);

    let detached = app.service.delete_parent(&alice, audit_id).await.unwrap();
    assert_eq!(detached.parent_id, None);
}

#[tokio::test]
async fn test_parent_link_requires_editable_parent() {
    let app = TestApp::with_reviews(1);
    let alice = user_ctx("alice");
    let first = app.seed_audit(&alice, &[]).await;
    let second = app.seed_audit(&alice, &[]).await;

    let multi = app
        .service
        .create_audit(
            &alice,
            CreateAuditRequest {
                name: "Yearly program".into(),
                language: "en".into(),
                audit_type: "Web Application".into(),
                kind: AuditKind::Multi,
                parent_id: None,
            },
        )
        .await
        .unwrap();

    app.service.update_parent(&alice, first, multi.id).await.unwrap();
    app.service.request_review(&alice, multi.id).await.unwrap();

    // No attach while the container is under review.
    let err = app
        .service
        .update_parent(&alice, second, multi.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidTransition);

    // And no detach either.
    let err = app.service.delete_parent(&alice, first).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidTransition);

    app.service.revert_to_edit(&alice, multi.id).await.unwrap();
    let detached = app.service.delete_parent(&alice, first).await.unwrap();
    assert_eq!(detached.parent_id, None);
}

#[tokio::test]
async fn test_create_audit_with_parent_link() {
    let app = TestApp::with_reviews(1);
    let alice = user_ctx("alice");

    let multi = app
        .service
        .create_audit(
            &alice,
            CreateAuditRequest {
                name: "Yearly program".into(),
                language: "en".into(),
                audit_type: "Web Application".into(),
                kind: AuditKind::Multi,
                parent_id: None,
            },
        )
        .await
        .unwrap();

    let child = app
        .service
        .create_audit(
            &alice,
            CreateAuditRequest {
                name: "Spring assessment".into(),
                language: "en".into(),
                audit_type: "Web Application".into(),
                kind: AuditKind::Default,
                parent_id: Some(multi.id),
            },
        )
        .await
        .unwrap();
    assert_eq!(child.parent_id, Some(multi.id));

    let children = app.service.get_children(&alice, multi.id).await.unwrap();
    assert_eq!(children.len(), 1);

    // Only standalone audits can be born attached.
    let err = app
        .service
        .create_audit(
            &alice,
            CreateAuditRequest {
                name: "Nested program".into(),
                language: "en".into(),
                audit_type: "Web Application".into(),
                kind: AuditKind::Multi,
                parent_id: Some(multi.id),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::BadTarget);
}

#[tokio::test]
async fn test_reviewer_cannot_become_collaborator_in_one_request() {
    let app = TestApp::with_reviews(1);
    let alice = user_ctx("alice");
    let rita = reviewer_ctx("rita");
    let audit_id = app.seed_audit(&alice, &[rita.user.clone()]).await;

    // Replacing both lists at once does not bypass the standing
    // reviewer assignment.
    let err = app
        .service
        .update_general(
            &alice,
            audit_id,
            GeneralUpdate {
                collaborators: Some(vec![rita.user.clone()]),
                reviewers: Some(vec![]),
                ..GeneralUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::RoleConflict);
    assert_eq!(err.subject.as_deref(), Some("rita"));

    let audit = app.service.get_audit(&alice, audit_id).await.unwrap();
    assert_eq!(audit.reviewers.len(), 1);
    assert!(audit.collaborators.is_empty());
}

#[tokio::test]
async fn test_mutations_broadcast_change_events() {
    let app = TestApp::with_reviews(1);
    let alice = user_ctx("alice");
    let audit_id = app.seed_audit(&alice, &[]).await;

    let mut rx = app.broadcaster.subscribe(audit_id);

    app.service
        .update_scope(&alice, audit_id, vec![ScopeItem::named("DMZ")])
        .await
        .unwrap();

    let event = rx.recv().await.unwrap();
    assert_eq!(event.audit_id, audit_id);
    assert_eq!(event.actor_id, Some(alice.user_id()));
    assert_eq!(event.event, AuditEvent::ScopeUpdated);
}

#[tokio::test]
async fn test_connected_users_listing() {
    let app = TestApp::with_reviews(1);
    let alice = user_ctx("alice");
    let audit_id = app.seed_audit(&alice, &[]).await;

    app.presence
        .join(audit_id, alice.user_id(), &alice.user.username);

    let connected = app.service.connected_users(&alice, audit_id).await.unwrap();
    assert_eq!(connected, vec!["alice".to_string()]);

    app.presence.leave(audit_id, alice.user_id());
    let connected = app.service.connected_users(&alice, audit_id).await.unwrap();
    assert!(connected.is_empty());
}
