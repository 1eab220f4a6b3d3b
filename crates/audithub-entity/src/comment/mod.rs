//! Comment thread entity.

pub mod model;

pub use model::{Comment, CommentReply};
