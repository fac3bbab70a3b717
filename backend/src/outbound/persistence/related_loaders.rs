//! Batched loaders for the rows a projection embeds.
//!
//! Each loader issues one query for a whole batch of posts or comments, so a
//! listing costs a fixed number of round trips regardless of its length.
//! Callers run them inside a read-only transaction to see one snapshot.

use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::StoreError;
use crate::domain::{
    Comment, CommentView, DETAIL_COMMENT_LIMIT, Post, PostDetail, PostId, PostLink, PostSummary,
    ProjectionProfile, RelatedRecords, Tag, User, UserId, referenced_post_ids,
    referenced_user_ids,
};

use super::models::{CommentRow, PostLinkRow, TagRow, UserRow};
use super::schema::{comments, post_tags, posts, tags, users};

fn raw_ids<I: Into<i32> + Copy>(ids: &[I]) -> Vec<i32> {
    ids.iter().map(|id| (*id).into()).collect()
}

async fn load_users(
    conn: &mut AsyncPgConnection,
    ids: &[UserId],
) -> Result<Vec<User>, StoreError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<UserRow> = users::table
        .filter(users::id.eq_any(raw_ids(ids)))
        .select(UserRow::as_select())
        .load(conn)
        .await?;
    Ok(rows.into_iter().map(User::from).collect())
}

async fn load_post_tags(
    conn: &mut AsyncPgConnection,
    post_ids: &[PostId],
) -> Result<Vec<(PostId, Tag)>, StoreError> {
    if post_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<(i32, TagRow)> = post_tags::table
        .inner_join(tags::table)
        .filter(post_tags::post_id.eq_any(raw_ids(post_ids)))
        .order((tags::name, tags::id))
        .select((post_tags::post_id, TagRow::as_select()))
        .load(conn)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(post_id, tag)| (PostId::new(post_id), Tag::from(tag)))
        .collect())
}

async fn load_comment_counts(
    conn: &mut AsyncPgConnection,
    post_ids: &[PostId],
) -> Result<Vec<(PostId, u64)>, StoreError> {
    if post_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<(i32, i64)> = comments::table
        .filter(comments::post_id.eq_any(raw_ids(post_ids)))
        .group_by(comments::post_id)
        .select((comments::post_id, count_star()))
        .load(conn)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(post_id, count)| (PostId::new(post_id), u64::try_from(count).unwrap_or(0)))
        .collect())
}

async fn load_earliest_comments(
    conn: &mut AsyncPgConnection,
    post_id: PostId,
) -> Result<Vec<Comment>, StoreError> {
    let rows: Vec<CommentRow> = comments::table
        .filter(comments::post_id.eq(post_id.get()))
        .order((comments::created_at.asc(), comments::id.asc()))
        .limit(i64::from(DETAIL_COMMENT_LIMIT))
        .select(CommentRow::as_select())
        .load(conn)
        .await?;
    Ok(rows.into_iter().map(Comment::from).collect())
}

async fn load_post_links(
    conn: &mut AsyncPgConnection,
    post_ids: &[PostId],
) -> Result<Vec<PostLink>, StoreError> {
    if post_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<PostLinkRow> = posts::table
        .filter(posts::id.eq_any(raw_ids(post_ids)))
        .select((posts::id, posts::title))
        .load(conn)
        .await?;
    Ok(rows.into_iter().map(PostLink::from).collect())
}

/// Summary projections for `posts`, in the order given.
pub(crate) async fn post_summaries(
    conn: &mut AsyncPgConnection,
    posts: Vec<Post>,
) -> Result<Vec<PostSummary>, StoreError> {
    let post_ids: Vec<PostId> = posts.iter().map(|post| post.id).collect();
    let author_ids = referenced_user_ids(&posts, []);
    let related = RelatedRecords::default()
        .with_users(load_users(conn, &author_ids).await?)
        .with_post_tags(load_post_tags(conn, &post_ids).await?)
        .with_comment_counts(load_comment_counts(conn, &post_ids).await?);
    Ok(related.post_summaries(posts)?)
}

/// Detail projection for a single post.
pub(crate) async fn post_detail(
    conn: &mut AsyncPgConnection,
    post: Post,
) -> Result<PostDetail, StoreError> {
    let post_ids = [post.id];
    let comments = load_earliest_comments(conn, post.id).await?;
    let user_ids = referenced_user_ids([&post], &comments);
    let related = RelatedRecords::default()
        .with_users(load_users(conn, &user_ids).await?)
        .with_post_tags(load_post_tags(conn, &post_ids).await?)
        .with_comment_counts(load_comment_counts(conn, &post_ids).await?)
        .with_comments(comments);
    Ok(related.post_detail(post)?)
}

/// Comment projections for `comments`, in the order given.
pub(crate) async fn comment_views(
    conn: &mut AsyncPgConnection,
    comments: Vec<Comment>,
    profile: ProjectionProfile,
) -> Result<Vec<CommentView>, StoreError> {
    let user_ids = referenced_user_ids([], &comments);
    let post_ids = referenced_post_ids(&comments);
    let related = RelatedRecords::default()
        .with_users(load_users(conn, &user_ids).await?)
        .with_post_links(load_post_links(conn, &post_ids).await?);
    Ok(related.comment_views(comments, profile)?)
}

/// Projection for a single comment.
pub(crate) async fn comment_view(
    conn: &mut AsyncPgConnection,
    comment: Comment,
    profile: ProjectionProfile,
) -> Result<CommentView, StoreError> {
    comment_views(conn, vec![comment], profile)
        .await?
        .pop()
        .ok_or_else(|| StoreError::query("comment projection came back empty"))
}
