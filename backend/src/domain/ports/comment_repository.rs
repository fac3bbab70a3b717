//! Driven port for comment persistence.

use async_trait::async_trait;

use crate::domain::{
    CommentChanges, CommentId, CommentView, NewComment, ProjectionProfile,
};

use super::StoreError;

/// Store operations over comments. Writes and listings use the summary
/// projection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a comment. Unknown author or post ids are foreign-key
    /// violations.
    async fn create(&self, comment: NewComment) -> Result<CommentView, StoreError>;

    async fn find(
        &self,
        id: CommentId,
        profile: ProjectionProfile,
    ) -> Result<Option<CommentView>, StoreError>;

    /// All comments, oldest first.
    async fn list(&self) -> Result<Vec<CommentView>, StoreError>;

    async fn update(&self, id: CommentId, changes: CommentChanges)
    -> Result<CommentView, StoreError>;

    async fn delete(&self, id: CommentId) -> Result<(), StoreError>;
}
