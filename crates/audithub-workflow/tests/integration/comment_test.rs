//! Comment thread tests.

use audithub_core::error::ErrorKind;
use audithub_core::types::{CommentId, SectionId};
use audithub_entity::comment::CommentReply;
use audithub_entity::finding::Finding;
use audithub_workflow::{CommentPatch, NewComment};

use crate::helpers::{admin_ctx, reviewer_ctx, user_ctx, TestApp};

fn double_anchor_comment(section_id: SectionId, text: &str) -> NewComment {
    NewComment {
        id: None,
        finding_id: Some(Default::default()),
        section_id: Some(section_id),
        field_name: "content".into(),
        author: Default::default(),
        text: text.into(),
    }
}

#[tokio::test]
async fn test_comment_requires_exactly_one_anchor() {
    let app = TestApp::with_reviews(1);
    let alice = user_ctx("alice");
    let audit_id = app.seed_audit(&alice, &[]).await;

    let err = app
        .service
        .create_comment(
            &alice,
            audit_id,
            NewComment {
                id: None,
                finding_id: None,
                section_id: None,
                field_name: "description".into(),
                author: alice.user_id(),
                text: "floating".into(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::BadTarget);

    let err = app
        .service
        .create_comment(&alice, audit_id, double_anchor_comment(SectionId::new(), "both"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::BadTarget);
}

#[tokio::test]
async fn test_comments_allowed_while_under_review() {
    let app = TestApp::with_reviews(1);
    let alice = user_ctx("alice");
    let rita = reviewer_ctx("rita");
    let audit_id = app.seed_audit(&alice, &[rita.user.clone()]).await;

    let finding = Finding::titled("CSRF");
    let finding_id = finding.id;
    app.service
        .create_finding(&alice, audit_id, finding)
        .await
        .unwrap();
    app.service.request_review(&alice, audit_id).await.unwrap();

    // The edit lock does not apply to the discussion layer.
    let commented = app
        .service
        .create_comment(
            &rita,
            audit_id,
            NewComment {
                id: None,
                finding_id: Some(finding_id),
                section_id: None,
                field_name: "remediation".into(),
                author: rita.user_id(),
                text: "suggest SameSite cookies".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(commented.comments.len(), 1);
    assert_eq!(commented.comments[0].author, rita.user_id());
    assert!(!commented.comments[0].resolved);
}

#[tokio::test]
async fn test_duplicate_explicit_comment_id_conflicts() {
    let app = TestApp::with_reviews(1);
    let alice = user_ctx("alice");
    let audit_id = app.seed_audit(&alice, &[]).await;
    let finding = Finding::titled("XSS");
    let finding_id = finding.id;
    app.service
        .create_finding(&alice, audit_id, finding)
        .await
        .unwrap();

    let comment_id = CommentId::new();
    let make = |text: &str| NewComment {
        id: Some(comment_id),
        finding_id: Some(finding_id),
        section_id: None,
        field_name: "poc".into(),
        author: alice.user_id(),
        text: text.into(),
    };

    app.service
        .create_comment(&alice, audit_id, make("first"))
        .await
        .unwrap();
    let err = app
        .service
        .create_comment(&alice, audit_id, make("second"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn test_reply_and_resolve_thread() {
    let app = TestApp::with_reviews(1);
    let alice = user_ctx("alice");
    let rita = reviewer_ctx("rita");
    let audit_id = app.seed_audit(&alice, &[rita.user.clone()]).await;
    let finding = Finding::titled("XSS");
    let finding_id = finding.id;
    app.service
        .create_finding(&alice, audit_id, finding)
        .await
        .unwrap();

    let created = app
        .service
        .create_comment(
            &rita,
            audit_id,
            NewComment {
                id: None,
                finding_id: Some(finding_id),
                section_id: None,
                field_name: "description".into(),
                author: rita.user_id(),
                text: "unclear impact".into(),
            },
        )
        .await
        .unwrap();
    let comment_id = created.comments[0].id;

    let updated = app
        .service
        .update_comment(
            &alice,
            audit_id,
            comment_id,
            CommentPatch {
                replies: vec![CommentReply {
                    author: alice.user_id(),
                    text: "clarified in the latest revision".into(),
                    created_at: alice.request_time,
                }],
                resolved: Some(true),
                ..CommentPatch::default()
            },
        )
        .await
        .unwrap();

    let comment = &updated.comments[0];
    assert_eq!(comment.replies.len(), 1);
    assert!(comment.resolved);
    assert_eq!(comment.text, "unclear impact");
}

#[tokio::test]
async fn test_only_author_or_admin_deletes_comment() {
    let app = TestApp::with_reviews(1);
    let alice = user_ctx("alice");
    let bob = user_ctx("bob");
    let admin = admin_ctx("root");
    let audit_id = app.seed_audit(&alice, &[]).await;
    let finding = Finding::titled("XSS");
    let finding_id = finding.id;
    app.service
        .create_finding(&alice, audit_id, finding)
        .await
        .unwrap();

    // Add bob as a collaborator so he can reach the audit at all.
    app.service
        .update_general(
            &alice,
            audit_id,
            audithub_workflow::GeneralUpdate {
                collaborators: Some(vec![bob.user.clone()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let created = app
        .service
        .create_comment(
            &alice,
            audit_id,
            NewComment {
                id: None,
                finding_id: Some(finding_id),
                section_id: None,
                field_name: "poc".into(),
                author: alice.user_id(),
                text: "mine".into(),
            },
        )
        .await
        .unwrap();
    let comment_id = created.comments[0].id;

    let err = app
        .service
        .delete_comment(&bob, audit_id, comment_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::PermissionDenied);

    let deleted = app
        .service
        .delete_comment(&admin, audit_id, comment_id)
        .await
        .unwrap();
    assert!(deleted.comments.is_empty());

    let err = app
        .service
        .delete_comment(&alice, audit_id, comment_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}
