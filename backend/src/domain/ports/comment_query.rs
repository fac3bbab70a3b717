//! Driving port for comment reads.

use async_trait::async_trait;

use crate::domain::{CommentId, CommentView, Error};

#[async_trait]
pub trait CommentQuery: Send + Sync {
    /// Every comment in the summary projection.
    async fn find_all(&self) -> Result<Vec<CommentView>, Error>;

    /// One comment in the detail projection.
    async fn find_one(&self, id: CommentId) -> Result<CommentView, Error>;
}
