//! Driving port for user writes.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, RemovalReceipt, User, UserChanges, UserId};

#[async_trait]
pub trait UserCommand: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, Error>;

    async fn update(&self, id: UserId, changes: UserChanges) -> Result<User, Error>;

    async fn remove(&self, id: UserId) -> Result<RemovalReceipt, Error>;
}
