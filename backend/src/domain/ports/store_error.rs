//! Failures reported by the entity store adapters.
//!
//! Adapters classify backend failures into these four variants and never
//! interpret them further; the services decide what the caller sees.

use std::fmt;

use super::define_port_error;
use crate::domain::ProjectionError;

/// Which kind of constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// A unique index, e.g. `users.email` or `tags.name`.
    Unique,
    /// A foreign key, e.g. a post naming an unknown author.
    ForeignKey,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unique => f.write_str("unique"),
            Self::ForeignKey => f.write_str("foreign key"),
        }
    }
}

define_port_error! {
    /// Errors raised by the user, post, comment, and tag stores.
    pub enum StoreError {
        /// The addressed row does not exist.
        NotFound { message: String } => "record not found: {message}",
        /// A constraint rejected the write.
        ConstraintViolation { kind: ConstraintKind, constraint: String } =>
            "{kind} constraint violated: {constraint}",
        /// The backend could not be reached.
        Unavailable { message: String } => "store unavailable: {message}",
        /// Any other backend failure.
        Query { message: String } => "store query failed: {message}",
    }
}

impl StoreError {
    /// Whether a unique constraint rejected the write.
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Self::ConstraintViolation {
                kind: ConstraintKind::Unique,
                ..
            }
        )
    }

    /// Name of the violated constraint, if any.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            Self::ConstraintViolation { constraint, .. } => Some(constraint),
            _ => None,
        }
    }
}

impl From<ProjectionError> for StoreError {
    fn from(error: ProjectionError) -> Self {
        Self::query(error.to_string())
    }
}
