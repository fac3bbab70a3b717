//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; each converts into its
//! domain record.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Comment, CommentChanges, CommentId, NewComment, NewTag, NewUser, Post, PostFieldChanges,
    PostFields, PostId, PostLink, Tag, TagId, User, UserChanges, UserId,
};

use super::schema::{comments, post_tags, posts, tags, users};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            name: row.name,
            email: row.email,
            image_url: row.image_url,
            bio: row.bio,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub image_url: Option<&'a str>,
    pub bio: Option<&'a str>,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            name: &user.name,
            email: &user.email,
            image_url: user.image_url.as_deref(),
            bio: user.bio.as_deref(),
        }
    }
}

/// `None` skips a column; `Some(None)` writes `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub image_url: Option<Option<&'a str>>,
    pub bio: Option<Option<&'a str>>,
}

impl<'a> From<&'a UserChanges> for UserChangeset<'a> {
    fn from(changes: &'a UserChanges) -> Self {
        Self {
            name: changes.name.as_deref(),
            email: changes.email.as_deref(),
            image_url: changes
                .image_url
                .as_ref()
                .into_change()
                .map(|value| value.map(String::as_str)),
            bio: changes
                .bio
                .as_ref()
                .into_change()
                .map(|value| value.map(String::as_str)),
        }
    }
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: PostId::new(row.id),
            title: row.title,
            body: row.body,
            author_id: UserId::new(row.author_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub author_id: i32,
}

impl<'a> From<&'a PostFields> for NewPostRow<'a> {
    fn from(fields: &'a PostFields) -> Self {
        Self {
            title: &fields.title,
            body: &fields.body,
            author_id: fields.author_id.get(),
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = posts)]
pub(crate) struct PostChangeset<'a> {
    pub title: Option<&'a str>,
    pub body: Option<&'a str>,
    pub author_id: Option<i32>,
}

impl<'a> From<&'a PostFieldChanges> for PostChangeset<'a> {
    fn from(changes: &'a PostFieldChanges) -> Self {
        Self {
            title: changes.title.as_deref(),
            body: changes.body.as_deref(),
            author_id: changes.author_id.map(UserId::get),
        }
    }
}

/// `(id, title)` pairs used for comment projections.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct PostLinkRow {
    pub id: i32,
    pub title: String,
}

impl From<PostLinkRow> for PostLink {
    fn from(row: PostLinkRow) -> Self {
        Self {
            id: PostId::new(row.id),
            title: row.title,
        }
    }
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: i32,
    pub body: String,
    pub author_id: i32,
    pub post_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: CommentId::new(row.id),
            body: row.body,
            author_id: UserId::new(row.author_id),
            post_id: PostId::new(row.post_id),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub body: &'a str,
    pub author_id: i32,
    pub post_id: i32,
}

impl<'a> From<&'a NewComment> for NewCommentRow<'a> {
    fn from(comment: &'a NewComment) -> Self {
        Self {
            body: &comment.body,
            author_id: comment.author_id.get(),
            post_id: comment.post_id.get(),
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = comments)]
pub(crate) struct CommentChangeset<'a> {
    pub body: Option<&'a str>,
}

impl<'a> From<&'a CommentChanges> for CommentChangeset<'a> {
    fn from(changes: &'a CommentChanges) -> Self {
        Self {
            body: changes.body.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TagRow {
    pub id: i32,
    pub name: String,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Self {
            id: TagId::new(row.id),
            name: row.name,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tags)]
pub(crate) struct NewTagRow<'a> {
    pub name: &'a str,
}

impl<'a> From<&'a NewTag> for NewTagRow<'a> {
    fn from(tag: &'a NewTag) -> Self {
        Self { name: &tag.name }
    }
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = post_tags)]
pub(crate) struct PostTagRow {
    pub post_id: i32,
    pub tag_id: i32,
}
