//! Comment thread model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use audithub_core::types::{CommentId, FindingId, SectionId, UserId};

/// A reply within a comment thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentReply {
    /// The replying user.
    pub author: UserId,
    /// Reply text.
    pub text: String,
    /// When the reply was posted.
    pub created_at: DateTime<Utc>,
}

/// A comment thread anchored to a field of a finding or a section.
///
/// Exactly one of `finding_id` / `section_id` is set, never both and
/// never neither. `field_name` is an opaque identifier meaningful to the
/// rendering layer (e.g. `"descriptionField"` or a dynamic identifier for
/// a custom field); the core does not validate that the field exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier. May have been pre-allocated by the rich text
    /// editor annotation instead of being generated here.
    pub id: CommentId,
    /// Anchored finding, mutually exclusive with `section_id`.
    pub finding_id: Option<FindingId>,
    /// Anchored section, mutually exclusive with `finding_id`.
    pub section_id: Option<SectionId>,
    /// Field within the target entity the thread is anchored to.
    pub field_name: String,
    /// The thread author.
    pub author: UserId,
    /// Initial comment text.
    pub text: String,
    /// Ordered replies, append-only.
    #[serde(default)]
    pub replies: Vec<CommentReply>,
    /// Whether the thread has been resolved.
    #[serde(default)]
    pub resolved: bool,
    /// When the thread was created.
    pub created_at: DateTime<Utc>,
}
