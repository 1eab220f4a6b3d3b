//! Comment threads anchored to a finding or a section.
//!
//! Comments live outside the review lifecycle entirely: they can be
//! created, edited and resolved in any audit state so reviewers can
//! discuss a submitted audit. Every comment is anchored to exactly one
//! of a finding or a section.

use audithub_core::error::AppError;
use audithub_core::result::AppResult;
use audithub_core::types::{CommentId, FindingId, SectionId, UserId};
use audithub_entity::audit::Audit;
use audithub_entity::comment::{Comment, CommentReply};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct NewComment {
    /// Explicit id, when the client allocates one up front.
    pub id: Option<CommentId>,
    pub finding_id: Option<FindingId>,
    pub section_id: Option<SectionId>,
    pub field_name: String,
    pub author: UserId,
    pub text: String,
}

/// A partial update to a comment. `replies` are appended, not replaced.
#[derive(Debug, Default, Clone)]
pub struct CommentPatch {
    pub text: Option<String>,
    pub replies: Vec<CommentReply>,
    pub resolved: Option<bool>,
}

pub fn create_comment(audit: &mut Audit, new: NewComment, now: DateTime<Utc>) -> AppResult<CommentId> {
    match (new.finding_id, new.section_id) {
        (Some(_), None) | (None, Some(_)) => {}
        _ => {
            return Err(AppError::bad_target(
                "A comment must target exactly one of a finding or a section",
            ));
        }
    }
    let id = new.id.unwrap_or_default();
    if audit.comments.iter().any(|c| c.id == id) {
        return Err(AppError::conflict(format!(
            "A comment with id {id} already exists on the audit"
        )));
    }
    audit.comments.push(Comment {
        id,
        finding_id: new.finding_id,
        section_id: new.section_id,
        field_name: new.field_name,
        author: new.author,
        text: new.text,
        replies: Vec::new(),
        resolved: false,
        created_at: now,
    });
    Ok(id)
}

pub fn update_comment(audit: &mut Audit, id: CommentId, patch: CommentPatch) -> AppResult<()> {
    let comment = audit
        .comment_mut(id)
        .ok_or_else(|| AppError::not_found(format!("Comment {id} was not found on the audit")))?;
    if let Some(text) = patch.text {
        comment.text = text;
    }
    comment.replies.extend(patch.replies);
    if let Some(resolved) = patch.resolved {
        comment.resolved = resolved;
    }
    Ok(())
}

pub fn delete_comment(audit: &mut Audit, id: CommentId) -> AppResult<()> {
    let before = audit.comments.len();
    audit.comments.retain(|c| c.id != id);
    if audit.comments.len() == before {
        return Err(AppError::not_found(format!(
            "Comment {id} was not found on the audit"
        )));
    }
    Ok(())
}

/// Drop every comment anchored to a finding that no longer exists.
pub fn cascade_finding_comments(audit: &mut Audit, finding_id: FindingId) {
    audit.comments.retain(|c| c.finding_id != Some(finding_id));
}
