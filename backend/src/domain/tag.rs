//! Tag records and their commands.

use serde::{Deserialize, Serialize};

use super::TagId;

/// A stored tag. `name` is unique across tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// Fields for a new tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTag {
    pub name: String,
}

/// Partial update of a tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TagChanges {
    #[serde(default)]
    pub name: Option<String>,
}
