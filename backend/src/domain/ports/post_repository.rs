//! Driven port for post persistence.
//!
//! Every read returns a projection assembled from a single consistent
//! snapshot; every write returns the detail projection of the written post.

use async_trait::async_trait;
use pagination::PageWindow;

use crate::domain::{
    PostDetail, PostFieldChanges, PostFields, PostFilter, PostId, PostSummary, TagId,
    TagLinkPlan, WindowedRows,
};

use super::StoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post and link it to `tag_ids` in one transaction.
    async fn create(&self, post: PostFields, tag_ids: Vec<TagId>)
    -> Result<PostDetail, StoreError>;

    async fn find_detail(&self, id: PostId) -> Result<Option<PostDetail>, StoreError>;

    /// One window of the filtered listing, newest first, together with the
    /// total number of matching posts read from the same snapshot.
    async fn list_page(
        &self,
        filter: &PostFilter,
        window: PageWindow,
    ) -> Result<WindowedRows<PostSummary>, StoreError>;

    /// The whole filtered listing, newest first.
    async fn list_summaries(&self, filter: &PostFilter) -> Result<Vec<PostSummary>, StoreError>;

    /// Apply column changes and the link plan in one transaction.
    async fn update(
        &self,
        id: PostId,
        changes: PostFieldChanges,
        links: TagLinkPlan,
    ) -> Result<PostDetail, StoreError>;

    /// Delete a post, its comments, and its tag links.
    async fn delete(&self, id: PostId) -> Result<(), StoreError>;
}
