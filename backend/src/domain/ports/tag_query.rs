//! Driving port for tag reads.

use async_trait::async_trait;

use crate::domain::{Error, Tag, TagId};

#[async_trait]
pub trait TagQuery: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Tag>, Error>;

    async fn find_one(&self, id: TagId) -> Result<Tag, Error>;
}
