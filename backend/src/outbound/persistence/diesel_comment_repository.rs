//! PostgreSQL-backed `CommentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{CommentRepository, StoreError};
use crate::domain::{
    Comment, CommentChanges, CommentId, CommentView, NewComment, ProjectionProfile,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CommentChangeset, CommentRow, NewCommentRow};
use super::pool::DbPool;
use super::related_loaders::{comment_view, comment_views};
use super::schema::comments;

/// Diesel-backed implementation of the comment repository port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn create(&self, comment: NewComment) -> Result<CommentView, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewCommentRow::from(&comment);
        conn.transaction::<_, StoreError, _>(|conn| {
            async move {
                let row: CommentRow = diesel::insert_into(comments::table)
                    .values(&new_row)
                    .returning(CommentRow::as_returning())
                    .get_result(conn)
                    .await?;
                comment_view(conn, Comment::from(row), ProjectionProfile::Summary).await
            }
            .scope_boxed()
        })
        .await
    }

    async fn find(
        &self,
        id: CommentId,
        profile: ProjectionProfile,
    ) -> Result<Option<CommentView>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.build_transaction()
            .read_only()
            .repeatable_read()
            .run::<_, StoreError, _>(|conn| {
                async move {
                    let row: Option<CommentRow> = comments::table
                        .find(id.get())
                        .select(CommentRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    match row {
                        Some(row) => comment_view(conn, Comment::from(row), profile)
                            .await
                            .map(Some),
                        None => Ok(None),
                    }
                }
                .scope_boxed()
            })
            .await
    }

    async fn list(&self) -> Result<Vec<CommentView>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.build_transaction()
            .read_only()
            .repeatable_read()
            .run::<_, StoreError, _>(|conn| {
                async move {
                    let rows: Vec<CommentRow> = comments::table
                        .order((comments::created_at.asc(), comments::id.asc()))
                        .select(CommentRow::as_select())
                        .load(conn)
                        .await?;
                    let batch = rows.into_iter().map(Comment::from).collect();
                    comment_views(conn, batch, ProjectionProfile::Summary).await
                }
                .scope_boxed()
            })
            .await
    }

    async fn update(
        &self,
        id: CommentId,
        changes: CommentChanges,
    ) -> Result<CommentView, StoreError> {
        if changes.body.is_none() {
            return self
                .find(id, ProjectionProfile::Summary)
                .await?
                .ok_or_else(|| StoreError::not_found(format!("comment {id}")));
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = CommentChangeset::from(&changes);
        conn.transaction::<_, StoreError, _>(|conn| {
            async move {
                let row: CommentRow = diesel::update(comments::table.find(id.get()))
                    .set(&changeset)
                    .returning(CommentRow::as_returning())
                    .get_result(conn)
                    .await?;
                comment_view(conn, Comment::from(row), ProjectionProfile::Summary).await
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id: CommentId) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(comments::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if removed == 0 {
            return Err(StoreError::not_found(format!("comment {id}")));
        }
        Ok(())
    }
}
