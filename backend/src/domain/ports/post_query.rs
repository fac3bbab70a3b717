//! Driving port for post reads.

use async_trait::async_trait;
use pagination::{PageRequest, Paginated};

use crate::domain::{Error, PostDetail, PostFilter, PostId, PostSummary, UserId};

#[async_trait]
pub trait PostQuery: Send + Sync {
    /// One page of the filtered listing in the summary projection.
    async fn find_all(
        &self,
        filter: PostFilter,
        page: PageRequest,
    ) -> Result<Paginated<PostSummary>, Error>;

    async fn find_one(&self, id: PostId) -> Result<PostDetail, Error>;

    /// Every post by `author_id`, unpaginated.
    async fn find_by_author(&self, author_id: UserId) -> Result<Vec<PostSummary>, Error>;
}
