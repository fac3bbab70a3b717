//! Classification of pool and Diesel failures into [`StoreError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{ConstraintKind, StoreError};

use super::pool::PoolError;

/// Pool failures mean the database cannot be reached.
pub(crate) fn map_pool_error(error: PoolError) -> StoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StoreError::unavailable(message)
        }
    }
}

/// Map Diesel errors onto the store error classes.
///
/// Constraint violations keep the constraint name Postgres reported so the
/// caller can tell `users_email_key` from `posts_author_id_fkey`.
pub(crate) fn map_diesel_error(error: DieselError) -> StoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => debug!(
            ?kind,
            message = info.message(),
            constraint = info.constraint_name(),
            "diesel operation failed"
        ),
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => StoreError::not_found("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StoreError::constraint_violation(ConstraintKind::Unique, constraint_of(&*info))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            StoreError::constraint_violation(ConstraintKind::ForeignKey, constraint_of(&*info))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreError::unavailable("database connection closed")
        }
        DieselError::BrokenTransactionManager => {
            StoreError::unavailable("transaction manager broken")
        }
        other => StoreError::query(other.to_string()),
    }
}

fn constraint_of(info: &dyn diesel::result::DatabaseErrorInformation) -> String {
    info.constraint_name().unwrap_or("unknown").to_owned()
}

impl From<DieselError> for StoreError {
    fn from(error: DieselError) -> Self {
        map_diesel_error(error)
    }
}
