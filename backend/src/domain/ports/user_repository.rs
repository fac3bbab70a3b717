//! Driven port for user persistence.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserChanges, UserId};

use super::StoreError;

/// Store operations over users.
///
/// Deleting a user who still authors posts or comments fails with a
/// foreign-key [`StoreError::ConstraintViolation`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. A duplicate email is a unique violation.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    /// Fetch a user by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// All users ordered by id.
    async fn list(&self) -> Result<Vec<User>, StoreError>;

    /// Apply a partial update and return the stored row.
    async fn update(&self, id: UserId, changes: UserChanges) -> Result<User, StoreError>;

    /// Delete a user; [`StoreError::NotFound`] when absent.
    async fn delete(&self, id: UserId) -> Result<(), StoreError>;
}
