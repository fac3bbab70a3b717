//! Driving port for tag writes.

use async_trait::async_trait;

use crate::domain::{Error, NewTag, RemovalReceipt, Tag, TagChanges, TagId};

#[async_trait]
pub trait TagCommand: Send + Sync {
    async fn create(&self, tag: NewTag) -> Result<Tag, Error>;

    async fn update(&self, id: TagId, changes: TagChanges) -> Result<Tag, Error>;

    async fn remove(&self, id: TagId) -> Result<RemovalReceipt, Error>;
}
