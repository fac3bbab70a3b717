//! Translation of store failures into caller-facing domain errors.
//!
//! `NotFound` becomes "`<kind>` with id `<id>` does not exist". Every other
//! failure becomes a uniform "failed to `<operation>` `<kind>`" message whose
//! code reflects the failure class; the store's own message only reaches
//! the logs.

use serde_json::{Map, Value, json};
use tracing::{error, warn};

use super::ports::StoreError;
use super::{EntityKind, Error, ErrorCode, Operation};

/// The operation a service was attempting when the store failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OperationContext {
    operation: Operation,
    entity: EntityKind,
    target: Option<i32>,
}

impl OperationContext {
    pub(crate) const fn new(operation: Operation, entity: EntityKind) -> Self {
        Self {
            operation,
            entity,
            target: None,
        }
    }

    #[must_use]
    pub(crate) fn on(mut self, target: impl Into<i32>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// The error returned when the addressed row is absent.
    pub(crate) fn not_found(self) -> Error {
        let message = match self.target {
            Some(id) => format!("{} with id {id} does not exist", self.entity),
            None => format!("{} does not exist", self.entity),
        };
        let mut details = Map::new();
        details.insert("entity".into(), json!(self.entity));
        if let Some(id) = self.target {
            details.insert("id".into(), json!(id));
        }
        Error::not_found(message).with_details(Value::Object(details))
    }

    /// Classify a store failure, logging its detail.
    pub(crate) fn fail(self, failure: StoreError) -> Error {
        let code = match &failure {
            StoreError::NotFound { .. } => return self.not_found(),
            StoreError::ConstraintViolation { .. } => ErrorCode::Conflict,
            StoreError::Unavailable { .. } => ErrorCode::ServiceUnavailable,
            StoreError::Query { .. } => ErrorCode::InternalError,
        };

        if code == ErrorCode::Conflict {
            warn!(
                operation = %self.operation,
                entity = %self.entity,
                id = ?self.target,
                error = %failure,
                "store rejected write"
            );
        } else {
            error!(
                operation = %self.operation,
                entity = %self.entity,
                id = ?self.target,
                error = %failure,
                "store operation failed"
            );
        }

        let message = match self.target {
            Some(id) => format!("failed to {} {} with id {id}", self.operation, self.entity),
            None if self.operation == Operation::List => {
                format!("failed to list {}", self.entity.plural())
            }
            None => format!("failed to {} {}", self.operation, self.entity),
        };
        let mut details = Map::new();
        details.insert("operation".into(), json!(self.operation));
        details.insert("entity".into(), json!(self.entity));
        if let Some(id) = self.target {
            details.insert("id".into(), json!(id));
        }
        if let Some(constraint) = failure.constraint() {
            details.insert("constraint".into(), json!(constraint));
        }
        Error::new(code, message).with_details(Value::Object(details))
    }
}
