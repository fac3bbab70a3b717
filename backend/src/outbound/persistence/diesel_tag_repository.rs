//! PostgreSQL-backed `TagRepository` implementation using Diesel ORM.
//!
//! The `tags_name_key` unique index is what serialises concurrent tag
//! creation; a losing insert surfaces as a unique constraint violation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StoreError, TagRepository};
use crate::domain::{NewTag, Tag, TagChanges, TagId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewTagRow, TagRow};
use super::pool::DbPool;
use super::schema::tags;

/// Diesel-backed implementation of the tag repository port.
#[derive(Clone)]
pub struct DieselTagRepository {
    pool: DbPool,
}

impl DieselTagRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for DieselTagRepository {
    async fn create(&self, tag: NewTag) -> Result<Tag, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(tags::table)
            .values(NewTagRow::from(&tag))
            .returning(TagRow::as_returning())
            .get_result::<TagRow>(&mut conn)
            .await
            .map(Tag::from)
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: TagId) -> Result<Option<Tag>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        tags::table
            .find(id.get())
            .select(TagRow::as_select())
            .first::<TagRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Tag::from))
            .map_err(map_diesel_error)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        tags::table
            .filter(tags::name.eq(name))
            .select(TagRow::as_select())
            .first::<TagRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Tag::from))
            .map_err(map_diesel_error)
    }

    async fn list(&self) -> Result<Vec<Tag>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TagRow> = tags::table
            .order((tags::name, tags::id))
            .select(TagRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Tag::from).collect())
    }

    async fn rename(&self, id: TagId, changes: TagChanges) -> Result<Tag, StoreError> {
        let Some(name) = changes.name else {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| StoreError::not_found(format!("tag {id}")));
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(tags::table.find(id.get()))
            .set(tags::name.eq(name))
            .returning(TagRow::as_returning())
            .get_result::<TagRow>(&mut conn)
            .await
            .map(Tag::from)
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: TagId) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // post_tags rows go with the tag (ON DELETE CASCADE).
        let removed = diesel::delete(tags::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if removed == 0 {
            return Err(StoreError::not_found(format!("tag {id}")));
        }
        Ok(())
    }
}
