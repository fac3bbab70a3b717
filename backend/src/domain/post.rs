//! Post records, their commands, and the listing filter.
//!
//! Post commands carry tag *names*; the post service resolves them to ids
//! before anything reaches the post store, which only ever sees the
//! tag-free [`PostFields`] and [`PostFieldChanges`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PostId, UserId};

/// A stored post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Command creating a post and linking it to the named tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub author_id: UserId,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewPost {
    /// The column values, without the tag names.
    pub fn fields(&self) -> PostFields {
        PostFields {
            title: self.title.clone(),
            body: self.body.clone(),
            author_id: self.author_id,
        }
    }
}

/// Partial update of a post.
///
/// `tags: None` leaves the links alone; `tags: Some(vec![])` removes them all.
///
/// # Examples
/// ```
/// use blog_backend::domain::PostChanges;
///
/// let omitted: PostChanges = serde_json::from_str(r#"{"title":"t"}"#).unwrap();
/// let cleared: PostChanges = serde_json::from_str(r#"{"tags":[]}"#).unwrap();
/// assert_eq!(omitted.tags, None);
/// assert_eq!(cleared.tags, Some(vec![]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostChanges {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub author_id: Option<UserId>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl PostChanges {
    /// The column changes, without the tag names.
    pub fn field_changes(&self) -> PostFieldChanges {
        PostFieldChanges {
            title: self.title.clone(),
            body: self.body.clone(),
            author_id: self.author_id,
        }
    }
}

/// Column values of a new post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub body: String,
    pub author_id: UserId,
}

/// Column changes of a post update. `updated_at` is refreshed regardless.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFieldChanges {
    pub title: Option<String>,
    pub body: Option<String>,
    pub author_id: Option<UserId>,
}

impl PostFieldChanges {
    /// Apply the changes to an in-memory record.
    pub fn apply_to(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(body) = self.body {
            post.body = body;
        }
        if let Some(author_id) = self.author_id {
            post.author_id = author_id;
        }
    }
}

/// Optional equality filters for post listings. Both apply when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub author_id: Option<UserId>,
    /// Exact tag name.
    pub tag: Option<String>,
}

impl PostFilter {
    /// Only posts written by `author_id`.
    pub fn by_author(author_id: UserId) -> Self {
        Self {
            author_id: Some(author_id),
            tag: None,
        }
    }
}
