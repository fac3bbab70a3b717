//! Driven port for tag persistence.

use async_trait::async_trait;

use crate::domain::{NewTag, Tag, TagChanges, TagId};

use super::StoreError;

/// Store operations over tags.
///
/// The unique constraint on `name` is what keeps concurrent tag
/// reconciliation from creating duplicates; adapters must surface it as a
/// unique [`StoreError::ConstraintViolation`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn create(&self, tag: NewTag) -> Result<Tag, StoreError>;

    async fn find_by_id(&self, id: TagId) -> Result<Option<Tag>, StoreError>;

    /// Exact, case-sensitive lookup.
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, StoreError>;

    /// All tags ordered by name.
    async fn list(&self) -> Result<Vec<Tag>, StoreError>;

    async fn rename(&self, id: TagId, changes: TagChanges) -> Result<Tag, StoreError>;

    /// Delete a tag and its post links.
    async fn delete(&self, id: TagId) -> Result<(), StoreError>;
}
