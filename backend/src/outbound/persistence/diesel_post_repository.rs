//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! Writes run in one read-write transaction covering the post row, its tag
//! links, and the projection returned to the caller. Reads run in a
//! read-only `REPEATABLE READ` transaction so a listing's rows, its total,
//! and the related rows all come from one snapshot.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use pagination::PageWindow;

use crate::domain::ports::{PostRepository, StoreError};
use crate::domain::{
    Post, PostDetail, PostFieldChanges, PostFields, PostFilter, PostId, PostSummary, TagId,
    TagLinkPlan, WindowedRows,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewPostRow, PostChangeset, PostRow, PostTagRow};
use super::pool::DbPool;
use super::related_loaders::{post_detail, post_summaries};
use super::schema::{post_tags, posts, tags};

/// Diesel-backed implementation of the post repository port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Posts matching `filter`, unordered.
fn filtered_posts(filter: &PostFilter) -> posts::BoxedQuery<'static, Pg> {
    let mut query = posts::table.into_boxed();
    if let Some(author_id) = filter.author_id {
        query = query.filter(posts::author_id.eq(author_id.get()));
    }
    if let Some(tag) = &filter.tag {
        let tagged = post_tags::table
            .inner_join(tags::table)
            .filter(tags::name.eq(tag.clone()))
            .select(post_tags::post_id);
        query = query.filter(posts::id.eq_any(tagged));
    }
    query
}

async fn link_tags(
    conn: &mut AsyncPgConnection,
    post_id: i32,
    tag_ids: &[TagId],
) -> Result<(), StoreError> {
    if tag_ids.is_empty() {
        return Ok(());
    }
    let rows: Vec<PostTagRow> = tag_ids
        .iter()
        .map(|tag_id| PostTagRow {
            post_id,
            tag_id: tag_id.get(),
        })
        .collect();
    diesel::insert_into(post_tags::table)
        .values(&rows)
        .on_conflict_do_nothing()
        .execute(conn)
        .await?;
    Ok(())
}

async fn unlink_all_tags(conn: &mut AsyncPgConnection, post_id: i32) -> Result<(), StoreError> {
    diesel::delete(post_tags::table.filter(post_tags::post_id.eq(post_id)))
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn create(
        &self,
        post: PostFields,
        tag_ids: Vec<TagId>,
    ) -> Result<PostDetail, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewPostRow::from(&post);
        conn.transaction::<_, StoreError, _>(|conn| {
            async move {
                let row: PostRow = diesel::insert_into(posts::table)
                    .values(&new_row)
                    .returning(PostRow::as_returning())
                    .get_result(conn)
                    .await?;
                link_tags(conn, row.id, &tag_ids).await?;
                post_detail(conn, Post::from(row)).await
            }
            .scope_boxed()
        })
        .await
    }

    async fn find_detail(&self, id: PostId) -> Result<Option<PostDetail>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.build_transaction()
            .read_only()
            .repeatable_read()
            .run::<_, StoreError, _>(|conn| {
                async move {
                    let row: Option<PostRow> = posts::table
                        .find(id.get())
                        .select(PostRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    match row {
                        Some(row) => post_detail(conn, Post::from(row)).await.map(Some),
                        None => Ok(None),
                    }
                }
                .scope_boxed()
            })
            .await
    }

    async fn list_page(
        &self,
        filter: &PostFilter,
        window: PageWindow,
    ) -> Result<WindowedRows<PostSummary>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.build_transaction()
            .read_only()
            .repeatable_read()
            .run::<_, StoreError, _>(|conn| {
                async move {
                    let total: i64 = filtered_posts(filter).count().get_result(conn).await?;
                    let rows: Vec<PostRow> = filtered_posts(filter)
                        .order((posts::created_at.desc(), posts::id.desc()))
                        .offset(window.sql_offset())
                        .limit(window.sql_limit())
                        .select(PostRow::as_select())
                        .load(conn)
                        .await?;
                    let summaries =
                        post_summaries(conn, rows.into_iter().map(Post::from).collect()).await?;
                    Ok(WindowedRows::new(
                        summaries,
                        u64::try_from(total).unwrap_or(0),
                    ))
                }
                .scope_boxed()
            })
            .await
    }

    async fn list_summaries(&self, filter: &PostFilter) -> Result<Vec<PostSummary>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.build_transaction()
            .read_only()
            .repeatable_read()
            .run::<_, StoreError, _>(|conn| {
                async move {
                    let rows: Vec<PostRow> = filtered_posts(filter)
                        .order((posts::created_at.desc(), posts::id.desc()))
                        .select(PostRow::as_select())
                        .load(conn)
                        .await?;
                    post_summaries(conn, rows.into_iter().map(Post::from).collect()).await
                }
                .scope_boxed()
            })
            .await
    }

    async fn update(
        &self,
        id: PostId,
        changes: PostFieldChanges,
        links: TagLinkPlan,
    ) -> Result<PostDetail, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = PostChangeset::from(&changes);
        conn.transaction::<_, StoreError, _>(|conn| {
            async move {
                // updated_at always changes, so the SET list is never empty.
                let row: PostRow = diesel::update(posts::table.find(id.get()))
                    .set((&changeset, posts::updated_at.eq(diesel::dsl::now)))
                    .returning(PostRow::as_returning())
                    .get_result(conn)
                    .await?;
                if let TagLinkPlan::Replace(tag_ids) = &links {
                    unlink_all_tags(conn, row.id).await?;
                    link_tags(conn, row.id, tag_ids).await?;
                }
                post_detail(conn, Post::from(row)).await
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id: PostId) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // Comments and tag links cascade.
        let removed = diesel::delete(posts::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if removed == 0 {
            return Err(StoreError::not_found(format!("post {id}")));
        }
        Ok(())
    }
}
