//! Driving port for post writes.
//!
//! Create and update reconcile tag names before the post is written and
//! return the detail projection.

use async_trait::async_trait;

use crate::domain::{Error, NewPost, PostChanges, PostDetail, PostId, RemovalReceipt};

#[async_trait]
pub trait PostCommand: Send + Sync {
    async fn create(&self, post: NewPost) -> Result<PostDetail, Error>;

    async fn update(&self, id: PostId, changes: PostChanges) -> Result<PostDetail, Error>;

    async fn remove(&self, id: PostId) -> Result<RemovalReceipt, Error>;
}
