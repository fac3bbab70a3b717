//! Comment records and their commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CommentId, PostId, UserId};

/// A stored comment. Comments are deleted together with their post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub body: String,
    pub author_id: UserId,
    pub post_id: PostId,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new comment. Both references must exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub body: String,
    pub author_id: UserId,
    pub post_id: PostId,
}

/// Partial update of a comment. Only the body is editable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentChanges {
    #[serde(default)]
    pub body: Option<String>,
}
