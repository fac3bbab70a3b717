//! Entity kinds, write operations, and removal receipts.

use std::fmt;

use serde::Serialize;

/// The persisted entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    Post,
    Comment,
    Tag,
}

impl EntityKind {
    /// Lower-case name used in messages and error details.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Post => "post",
            Self::Comment => "comment",
            Self::Tag => "tag",
        }
    }

    /// Plural name used for listings.
    pub const fn plural(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Post => "posts",
            Self::Comment => "comments",
            Self::Tag => "tags",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operations an orchestrator performs against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Create,
    Find,
    List,
    Update,
    Remove,
}

impl Operation {
    /// Verb used in caller-facing failure messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Find => "find",
            Self::List => "list",
            Self::Update => "update",
            Self::Remove => "remove",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confirmation returned by every `remove` operation.
///
/// # Examples
/// ```
/// use blog_backend::domain::{EntityKind, RemovalReceipt};
///
/// let receipt = RemovalReceipt::new(EntityKind::Tag, 3);
/// assert_eq!(receipt.message, "tag with id 3 has been removed");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalReceipt {
    pub entity: EntityKind,
    pub id: i32,
    pub message: String,
}

impl RemovalReceipt {
    pub fn new(entity: EntityKind, id: impl Into<i32>) -> Self {
        let id = id.into();
        Self {
            entity,
            id,
            message: format!("{entity} with id {id} has been removed"),
        }
    }
}
