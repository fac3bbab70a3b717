//! Comment service implementing the comment driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{CommentCommand, CommentQuery, CommentRepository};
use crate::domain::store_error_mapping::OperationContext;
use crate::domain::{
    CommentChanges, CommentId, CommentView, EntityKind, Error, NewComment, Operation,
    ProjectionProfile, RemovalReceipt,
};

#[derive(Clone)]
pub struct CommentService<C> {
    comments: Arc<C>,
}

impl<C> CommentService<C> {
    pub fn new(comments: Arc<C>) -> Self {
        Self { comments }
    }
}

const fn context(operation: Operation) -> OperationContext {
    OperationContext::new(operation, EntityKind::Comment)
}

#[async_trait]
impl<C> CommentCommand for CommentService<C>
where
    C: CommentRepository,
{
    async fn create(&self, comment: NewComment) -> Result<CommentView, Error> {
        let created = self
            .comments
            .create(comment)
            .await
            .map_err(|err| context(Operation::Create).fail(err))?;
        info!(
            comment_id = %created.comment.id,
            post_id = %created.comment.post_id,
            "comment created"
        );
        Ok(created)
    }

    async fn update(&self, id: CommentId, changes: CommentChanges) -> Result<CommentView, Error> {
        let ctx = context(Operation::Update).on(id);
        self.comments
            .update(id, changes)
            .await
            .map_err(|err| ctx.fail(err))
    }

    async fn remove(&self, id: CommentId) -> Result<RemovalReceipt, Error> {
        let ctx = context(Operation::Remove).on(id);
        self.comments.delete(id).await.map_err(|err| ctx.fail(err))?;
        info!(comment_id = %id, "comment removed");
        Ok(RemovalReceipt::new(EntityKind::Comment, id))
    }
}

#[async_trait]
impl<C> CommentQuery for CommentService<C>
where
    C: CommentRepository,
{
    async fn find_all(&self) -> Result<Vec<CommentView>, Error> {
        self.comments
            .list()
            .await
            .map_err(|err| context(Operation::List).fail(err))
    }

    async fn find_one(&self, id: CommentId) -> Result<CommentView, Error> {
        let ctx = context(Operation::Find).on(id);
        self.comments
            .find(id, ProjectionProfile::Detail)
            .await
            .map_err(|err| ctx.fail(err))?
            .ok_or_else(|| ctx.not_found())
    }
}
