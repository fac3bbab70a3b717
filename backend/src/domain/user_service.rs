//! User service implementing the user driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{UserCommand, UserQuery, UserRepository};
use crate::domain::store_error_mapping::OperationContext;
use crate::domain::{EntityKind, Error, NewUser, Operation, RemovalReceipt, User, UserChanges, UserId};

#[derive(Clone)]
pub struct UserService<U> {
    users: Arc<U>,
}

impl<U> UserService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

const fn context(operation: Operation) -> OperationContext {
    OperationContext::new(operation, EntityKind::User)
}

#[async_trait]
impl<U> UserCommand for UserService<U>
where
    U: UserRepository,
{
    async fn create(&self, user: NewUser) -> Result<User, Error> {
        let created = self
            .users
            .create(user)
            .await
            .map_err(|err| context(Operation::Create).fail(err))?;
        info!(user_id = %created.id, "user created");
        Ok(created)
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> Result<User, Error> {
        let ctx = context(Operation::Update).on(id);
        self.users
            .update(id, changes)
            .await
            .map_err(|err| ctx.fail(err))
    }

    async fn remove(&self, id: UserId) -> Result<RemovalReceipt, Error> {
        let ctx = context(Operation::Remove).on(id);
        self.users.delete(id).await.map_err(|err| ctx.fail(err))?;
        info!(user_id = %id, "user removed");
        Ok(RemovalReceipt::new(EntityKind::User, id))
    }
}

#[async_trait]
impl<U> UserQuery for UserService<U>
where
    U: UserRepository,
{
    async fn find_all(&self) -> Result<Vec<User>, Error> {
        self.users
            .list()
            .await
            .map_err(|err| context(Operation::List).fail(err))
    }

    async fn find_one(&self, id: UserId) -> Result<User, Error> {
        let ctx = context(Operation::Find).on(id);
        self.users
            .find_by_id(id)
            .await
            .map_err(|err| ctx.fail(err))?
            .ok_or_else(|| ctx.not_found())
    }
}
