//! Post service implementing the post driving ports.
//!
//! Tag names in create and update commands are reconciled against the tag
//! store before the post is written. Reconciliation runs outside the post's
//! write transaction so a lost create race on a tag does not abort it; the
//! resolved ids are then linked inside the post transaction. An update that
//! names tags first checks the post exists, so patching a missing post never
//! creates tag rows.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, Paginated};
use tracing::{debug, info};

use crate::domain::ports::{PostCommand, PostQuery, PostRepository, TagRepository};
use crate::domain::store_error_mapping::OperationContext;
use crate::domain::tag_reconciliation::TagReconciler;
use crate::domain::{
    EntityKind, Error, NewPost, Operation, PostChanges, PostDetail, PostFilter, PostId,
    PostSummary, RemovalReceipt, TagLinkPlan, UserId, normalise_tag_names,
};

pub struct PostService<P, T> {
    posts: Arc<P>,
    reconciler: TagReconciler<T>,
}

impl<P, T> PostService<P, T> {
    pub fn new(posts: Arc<P>, tags: Arc<T>) -> Self {
        Self {
            posts,
            reconciler: TagReconciler::new(tags),
        }
    }
}

const fn context(operation: Operation) -> OperationContext {
    OperationContext::new(operation, EntityKind::Post)
}

#[async_trait]
impl<P, T> PostCommand for PostService<P, T>
where
    P: PostRepository,
    T: TagRepository,
{
    async fn create(&self, post: NewPost) -> Result<PostDetail, Error> {
        let ctx = context(Operation::Create);
        let tag_ids = self
            .reconciler
            .resolve(post.tags.as_slice())
            .await
            .map_err(|err| ctx.fail(err))?;
        let detail = self
            .posts
            .create(post.fields(), tag_ids)
            .await
            .map_err(|err| ctx.fail(err))?;
        info!(post_id = %detail.post.id, tags = detail.tags.len(), "post created");
        Ok(detail)
    }

    async fn update(&self, id: PostId, changes: PostChanges) -> Result<PostDetail, Error> {
        let ctx = context(Operation::Update).on(id);
        let names_tags = changes
            .tags
            .as_deref()
            .is_some_and(|names| !normalise_tag_names(names).is_empty());
        if names_tags {
            self.posts
                .find_detail(id)
                .await
                .map_err(|err| ctx.fail(err))?
                .ok_or_else(|| ctx.not_found())?;
        }
        let plan = self
            .reconciler
            .plan_update(changes.tags.as_deref())
            .await
            .map_err(|err| ctx.fail(err))?;
        if let TagLinkPlan::Replace(ids) = &plan {
            debug!(post_id = %id, tags = ids.len(), "replacing post tags");
        }
        self.posts
            .update(id, changes.field_changes(), plan)
            .await
            .map_err(|err| ctx.fail(err))
    }

    async fn remove(&self, id: PostId) -> Result<RemovalReceipt, Error> {
        let ctx = context(Operation::Remove).on(id);
        self.posts.delete(id).await.map_err(|err| ctx.fail(err))?;
        info!(post_id = %id, "post removed");
        Ok(RemovalReceipt::new(EntityKind::Post, id))
    }
}

#[async_trait]
impl<P, T> PostQuery for PostService<P, T>
where
    P: PostRepository,
    T: TagRepository,
{
    async fn find_all(
        &self,
        filter: PostFilter,
        page: PageRequest,
    ) -> Result<Paginated<PostSummary>, Error> {
        let rows = self
            .posts
            .list_page(&filter, page.window())
            .await
            .map_err(|err| context(Operation::List).fail(err))?;
        Ok(rows.into_paginated(page))
    }

    async fn find_one(&self, id: PostId) -> Result<PostDetail, Error> {
        let ctx = context(Operation::Find).on(id);
        self.posts
            .find_detail(id)
            .await
            .map_err(|err| ctx.fail(err))?
            .ok_or_else(|| ctx.not_found())
    }

    async fn find_by_author(&self, author_id: UserId) -> Result<Vec<PostSummary>, Error> {
        self.posts
            .list_summaries(&PostFilter::by_author(author_id))
            .await
            .map_err(|err| context(Operation::List).fail(err))
    }
}
