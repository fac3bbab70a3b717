//! Response projections and the batch assembler that builds them.
//!
//! Adapters load every related row a projection needs in a fixed number of
//! batched reads, hand them to [`RelatedRecords`], and let it assemble the
//! shaped views. Both the Diesel adapters and the in-memory store go through
//! the same assembler, so projection shapes cannot drift between them.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use super::{Comment, CommentId, Post, PostId, Tag, User, UserId};

/// Maximum number of comments embedded in a post detail projection.
pub const DETAIL_COMMENT_LIMIT: u8 = 3;

/// Named response shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionProfile {
    /// List rows: compact relations, counts instead of collections.
    Summary,
    /// Single-entity reads and write results.
    Detail,
    /// Identity plus a display label.
    Link,
}

/// How much of a user is embedded as an author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorShape {
    /// `id`, `name`.
    Link,
    /// `id`, `name`, `imageUrl`.
    Compact,
    /// `id`, `name`, `email`, `imageUrl`.
    Contact,
    /// `id`, `name`, `email`, `imageUrl`, `bio`.
    Full,
}

impl AuthorShape {
    /// Author shape embedded in a post projection.
    pub const fn for_post(profile: ProjectionProfile) -> Self {
        match profile {
            ProjectionProfile::Summary => Self::Contact,
            ProjectionProfile::Detail => Self::Full,
            ProjectionProfile::Link => Self::Link,
        }
    }

    /// Author shape embedded in a comment projection.
    pub const fn for_comment(profile: ProjectionProfile) -> Self {
        match profile {
            ProjectionProfile::Summary => Self::Compact,
            ProjectionProfile::Detail => Self::Contact,
            ProjectionProfile::Link => Self::Link,
        }
    }
}

/// An embedded author. Fields outside the chosen shape are omitted from the
/// wire form; `Some(None)` serialises as an explicit `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    pub id: UserId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<Option<String>>,
}

impl AuthorView {
    pub fn project(user: &User, shape: AuthorShape) -> Self {
        let with_image = !matches!(shape, AuthorShape::Link);
        let with_email = matches!(shape, AuthorShape::Contact | AuthorShape::Full);
        Self {
            id: user.id,
            name: user.name.clone(),
            email: with_email.then(|| user.email.clone()),
            image_url: with_image.then(|| user.image_url.clone()),
            bio: matches!(shape, AuthorShape::Full).then(|| user.bio.clone()),
        }
    }
}

/// A post reduced to its identity and title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostLink {
    pub id: PostId,
    pub title: String,
}

impl From<&Post> for PostLink {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
        }
    }
}

/// A user reduced to its identity and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserLink {
    pub id: UserId,
    pub name: String,
}

impl From<&User> for UserLink {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
        }
    }
}

/// Post list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    #[serde(flatten)]
    pub post: Post,
    pub author: AuthorView,
    pub tags: Vec<Tag>,
    pub comment_count: u64,
}

/// A comment embedded in a post detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPreview {
    pub id: CommentId,
    pub body: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub author: AuthorView,
}

/// Single post read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub author: AuthorView,
    pub tags: Vec<Tag>,
    /// The earliest comments, at most [`DETAIL_COMMENT_LIMIT`].
    pub comments: Vec<CommentPreview>,
    pub comment_count: u64,
}

/// Comment projection for both listings and single reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub author: AuthorView,
    pub post: PostLink,
}

/// A projection referenced a row the batch did not contain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectionError {
    #[error("author {user_id} missing from projection batch")]
    MissingAuthor { user_id: UserId },
    #[error("post {post_id} missing from projection batch")]
    MissingPost { post_id: PostId },
}

/// Related rows loaded for one batch of posts or comments.
///
/// # Examples
/// ```
/// use blog_backend::domain::{Post, PostId, RelatedRecords, User, UserId};
/// use chrono::Utc;
///
/// let author = User {
///     id: UserId::new(1),
///     name: "Ada".into(),
///     email: "ada@example.com".into(),
///     image_url: None,
///     bio: None,
/// };
/// let post = Post {
///     id: PostId::new(1),
///     title: "Hello".into(),
///     body: "...".into(),
///     author_id: author.id,
///     created_at: Utc::now(),
///     updated_at: Utc::now(),
/// };
/// let summary = RelatedRecords::default()
///     .with_users([author])
///     .post_summary(post)
///     .unwrap();
/// assert_eq!(summary.comment_count, 0);
/// assert!(summary.tags.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RelatedRecords {
    users: HashMap<UserId, User>,
    tags: HashMap<PostId, Vec<Tag>>,
    comment_counts: HashMap<PostId, u64>,
    comments: HashMap<PostId, Vec<Comment>>,
    posts: HashMap<PostId, PostLink>,
}

impl RelatedRecords {
    #[must_use]
    pub fn with_users(mut self, users: impl IntoIterator<Item = User>) -> Self {
        self.users
            .extend(users.into_iter().map(|user| (user.id, user)));
        self
    }

    /// Post/tag pairs from the join table. Each post's tags end up ordered
    /// by name.
    #[must_use]
    pub fn with_post_tags(mut self, links: impl IntoIterator<Item = (PostId, Tag)>) -> Self {
        for (post_id, tag) in links {
            self.tags.entry(post_id).or_default().push(tag);
        }
        for tags in self.tags.values_mut() {
            tags.sort_by(|left, right| left.name.cmp(&right.name).then(left.id.cmp(&right.id)));
            tags.dedup_by_key(|tag| tag.id);
        }
        self
    }

    #[must_use]
    pub fn with_comment_counts(mut self, counts: impl IntoIterator<Item = (PostId, u64)>) -> Self {
        self.comment_counts.extend(counts);
        self
    }

    /// Comments to embed in detail projections. Only the earliest
    /// [`DETAIL_COMMENT_LIMIT`] per post are kept.
    #[must_use]
    pub fn with_comments(mut self, comments: impl IntoIterator<Item = Comment>) -> Self {
        for comment in comments {
            self.comments.entry(comment.post_id).or_default().push(comment);
        }
        for comments in self.comments.values_mut() {
            comments.sort_by(|left, right| {
                left.created_at
                    .cmp(&right.created_at)
                    .then(left.id.cmp(&right.id))
            });
            comments.truncate(usize::from(DETAIL_COMMENT_LIMIT));
        }
        self
    }

    #[must_use]
    pub fn with_post_links(mut self, links: impl IntoIterator<Item = PostLink>) -> Self {
        self.posts.extend(links.into_iter().map(|link| (link.id, link)));
        self
    }

    fn author(&self, user_id: UserId, shape: AuthorShape) -> Result<AuthorView, ProjectionError> {
        self.users
            .get(&user_id)
            .map(|user| AuthorView::project(user, shape))
            .ok_or(ProjectionError::MissingAuthor { user_id })
    }

    fn tags_of(&self, post_id: PostId) -> Vec<Tag> {
        self.tags.get(&post_id).cloned().unwrap_or_default()
    }

    fn comment_count_of(&self, post_id: PostId) -> u64 {
        self.comment_counts.get(&post_id).copied().unwrap_or(0)
    }

    pub fn post_summary(&self, post: Post) -> Result<PostSummary, ProjectionError> {
        Ok(PostSummary {
            author: self.author(
                post.author_id,
                AuthorShape::for_post(ProjectionProfile::Summary),
            )?,
            tags: self.tags_of(post.id),
            comment_count: self.comment_count_of(post.id),
            post,
        })
    }

    /// Summaries in the order the posts were given.
    pub fn post_summaries(&self, posts: Vec<Post>) -> Result<Vec<PostSummary>, ProjectionError> {
        posts
            .into_iter()
            .map(|post| self.post_summary(post))
            .collect()
    }

    pub fn post_detail(&self, post: Post) -> Result<PostDetail, ProjectionError> {
        let preview_shape = AuthorShape::for_comment(ProjectionProfile::Summary);
        let comments = self
            .comments
            .get(&post.id)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|comment| {
                Ok(CommentPreview {
                    id: comment.id,
                    body: comment.body.clone(),
                    created_at: comment.created_at,
                    author: self.author(comment.author_id, preview_shape)?,
                })
            })
            .collect::<Result<Vec<_>, ProjectionError>>()?;
        Ok(PostDetail {
            author: self.author(
                post.author_id,
                AuthorShape::for_post(ProjectionProfile::Detail),
            )?,
            tags: self.tags_of(post.id),
            comment_count: self.comment_count_of(post.id),
            comments,
            post,
        })
    }

    pub fn comment_view(
        &self,
        comment: Comment,
        profile: ProjectionProfile,
    ) -> Result<CommentView, ProjectionError> {
        let post = self
            .posts
            .get(&comment.post_id)
            .cloned()
            .ok_or(ProjectionError::MissingPost {
                post_id: comment.post_id,
            })?;
        Ok(CommentView {
            author: self.author(comment.author_id, AuthorShape::for_comment(profile))?,
            post,
            comment,
        })
    }

    pub fn comment_views(
        &self,
        comments: Vec<Comment>,
        profile: ProjectionProfile,
    ) -> Result<Vec<CommentView>, ProjectionError> {
        comments
            .into_iter()
            .map(|comment| self.comment_view(comment, profile))
            .collect()
    }
}

/// Distinct user ids referenced by a batch of posts and comments.
pub fn referenced_user_ids<'a>(
    posts: impl IntoIterator<Item = &'a Post>,
    comments: impl IntoIterator<Item = &'a Comment>,
) -> Vec<UserId> {
    posts
        .into_iter()
        .map(|post| post.author_id)
        .chain(comments.into_iter().map(|comment| comment.author_id))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct post ids referenced by a batch of comments.
pub fn referenced_post_ids<'a>(comments: impl IntoIterator<Item = &'a Comment>) -> Vec<PostId> {
    comments
        .into_iter()
        .map(|comment| comment.post_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests;
