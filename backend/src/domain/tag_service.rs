//! Tag service implementing the tag driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{TagCommand, TagQuery, TagRepository};
use crate::domain::store_error_mapping::OperationContext;
use crate::domain::{EntityKind, Error, NewTag, Operation, RemovalReceipt, Tag, TagChanges, TagId};

#[derive(Clone)]
pub struct TagService<T> {
    tags: Arc<T>,
}

impl<T> TagService<T> {
    pub fn new(tags: Arc<T>) -> Self {
        Self { tags }
    }
}

const fn context(operation: Operation) -> OperationContext {
    OperationContext::new(operation, EntityKind::Tag)
}

#[async_trait]
impl<T> TagCommand for TagService<T>
where
    T: TagRepository,
{
    async fn create(&self, tag: NewTag) -> Result<Tag, Error> {
        let created = self
            .tags
            .create(tag)
            .await
            .map_err(|err| context(Operation::Create).fail(err))?;
        info!(tag_id = %created.id, tag = %created.name, "tag created");
        Ok(created)
    }

    async fn update(&self, id: TagId, changes: TagChanges) -> Result<Tag, Error> {
        let ctx = context(Operation::Update).on(id);
        self.tags
            .rename(id, changes)
            .await
            .map_err(|err| ctx.fail(err))
    }

    async fn remove(&self, id: TagId) -> Result<RemovalReceipt, Error> {
        let ctx = context(Operation::Remove).on(id);
        self.tags.delete(id).await.map_err(|err| ctx.fail(err))?;
        info!(tag_id = %id, "tag removed");
        Ok(RemovalReceipt::new(EntityKind::Tag, id))
    }
}

#[async_trait]
impl<T> TagQuery for TagService<T>
where
    T: TagRepository,
{
    async fn find_all(&self) -> Result<Vec<Tag>, Error> {
        self.tags
            .list()
            .await
            .map_err(|err| context(Operation::List).fail(err))
    }

    async fn find_one(&self, id: TagId) -> Result<Tag, Error> {
        let ctx = context(Operation::Find).on(id);
        self.tags
            .find_by_id(id)
            .await
            .map_err(|err| ctx.fail(err))?
            .ok_or_else(|| ctx.not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{ConstraintKind, MockTagRepository, StoreError};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn rename_to_taken_name_is_a_conflict() {
        let mut tags = MockTagRepository::new();
        tags.expect_rename().returning(|_, _| {
            Err(StoreError::constraint_violation(
                ConstraintKind::Unique,
                "tags_name_key",
            ))
        });
        let service = TagService::new(Arc::new(tags));

        let err = service
            .update(
                TagId::new(2),
                TagChanges {
                    name: Some("rust".into()),
                },
            )
            .await
            .expect_err("taken");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), "failed to update tag with id 2");
        assert_eq!(
            err.details().and_then(|d| d.get("constraint")),
            Some(&serde_json::json!("tags_name_key"))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn find_one_reports_missing_tag() {
        let mut tags = MockTagRepository::new();
        tags.expect_find_by_id().returning(|_| Ok(None));
        let service = TagService::new(Arc::new(tags));

        let err = service.find_one(TagId::new(8)).await.expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "tag with id 8 does not exist");
    }

    #[rstest]
    #[tokio::test]
    async fn remove_of_absent_tag_is_not_found() {
        let mut tags = MockTagRepository::new();
        tags.expect_delete()
            .returning(|_| Err(StoreError::not_found("tag")));
        let service = TagService::new(Arc::new(tags));

        let err = service.remove(TagId::new(8)).await.expect_err("absent");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
