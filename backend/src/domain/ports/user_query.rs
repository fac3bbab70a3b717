//! Driving port for user reads.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

#[async_trait]
pub trait UserQuery: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>, Error>;

    /// Fails with [`crate::domain::ErrorCode::NotFound`] when absent.
    async fn find_one(&self, id: UserId) -> Result<User, Error>;
}
