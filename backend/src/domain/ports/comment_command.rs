//! Driving port for comment writes.

use async_trait::async_trait;

use crate::domain::{CommentChanges, CommentId, CommentView, Error, NewComment, RemovalReceipt};

#[async_trait]
pub trait CommentCommand: Send + Sync {
    async fn create(&self, comment: NewComment) -> Result<CommentView, Error>;

    async fn update(&self, id: CommentId, changes: CommentChanges) -> Result<CommentView, Error>;

    async fn remove(&self, id: CommentId) -> Result<RemovalReceipt, Error>;
}
