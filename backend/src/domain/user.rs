//! User records and the commands that write them.

use serde::{Deserialize, Serialize};

use super::{Patch, UserId};

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

/// Fields for a new user. `email` must be unique across users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Partial update of a user.
///
/// # Examples
/// ```
/// use blog_backend::domain::{Patch, UserChanges};
///
/// let changes: UserChanges = serde_json::from_str(r#"{"bio":null}"#).unwrap();
/// assert_eq!(changes.name, None);
/// assert_eq!(changes.bio, Patch::Null);
/// assert!(!changes.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image_url: Patch<String>,
    #[serde(default)]
    pub bio: Patch<String>,
}

impl UserChanges {
    /// Whether no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.image_url.is_absent()
            && self.bio.is_absent()
    }

    /// Apply the changes to an in-memory record.
    pub fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        self.image_url.apply_to(&mut user.image_url);
        self.bio.apply_to(&mut user.bio);
    }
}
