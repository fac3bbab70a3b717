//! Resolution of tag names to tag ids with create-or-connect semantics.
//!
//! Each distinct name maps to exactly one stored tag. Missing tags are
//! created on demand; when a concurrent writer wins the race to create the
//! same name, the store's unique constraint rejects the second insert and
//! the loser re-reads the winner's row instead of failing.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use super::ports::{StoreError, TagRepository};
use super::{NewTag, TagId};

/// What a post write should do with the post's existing tag links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagLinkPlan {
    /// Leave the links untouched.
    Keep,
    /// Delete every link, then link exactly these tags.
    Replace(Vec<TagId>),
}

/// Trim names, drop blanks, and collapse duplicates, keeping first-seen
/// order. Matching is case-sensitive.
///
/// # Examples
/// ```
/// use blog_backend::domain::normalise_tag_names;
///
/// let names = normalise_tag_names(&[" rust ", "Rust", "", "rust"]);
/// assert_eq!(names, vec!["rust", "Rust"]);
/// ```
pub fn normalise_tag_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| name.as_ref().trim())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(*name))
        .map(str::to_owned)
        .collect()
}

/// Resolves tag names against a [`TagRepository`].
pub struct TagReconciler<T: ?Sized> {
    tags: Arc<T>,
}

impl<T: ?Sized> TagReconciler<T> {
    pub fn new(tags: Arc<T>) -> Self {
        Self { tags }
    }
}

impl<T> TagReconciler<T>
where
    T: TagRepository + ?Sized,
{
    /// Ids for `names`, in normalised order, creating missing tags.
    pub async fn resolve<S: AsRef<str> + Sync>(&self, names: &[S]) -> Result<Vec<TagId>, StoreError> {
        let mut ids = Vec::new();
        for name in normalise_tag_names(names) {
            ids.push(self.find_or_create(&name).await?);
        }
        Ok(ids)
    }

    /// The link plan for a post update: `None` keeps the links, any list
    /// (including an empty one) replaces them.
    pub async fn plan_update(&self, names: Option<&[String]>) -> Result<TagLinkPlan, StoreError> {
        match names {
            None => Ok(TagLinkPlan::Keep),
            Some(names) => self.resolve(names).await.map(TagLinkPlan::Replace),
        }
    }

    async fn find_or_create(&self, name: &str) -> Result<TagId, StoreError> {
        if let Some(existing) = self.tags.find_by_name(name).await? {
            return Ok(existing.id);
        }

        let created = self
            .tags
            .create(NewTag {
                name: name.to_owned(),
            })
            .await;
        match created {
            Ok(tag) => {
                debug!(tag_id = %tag.id, tag = name, "tag created during reconciliation");
                Ok(tag.id)
            }
            Err(error) if error.is_unique_violation() => {
                debug!(tag = name, "tag created concurrently; re-reading");
                match self.tags.find_by_name(name).await? {
                    Some(winner) => Ok(winner.id),
                    None => Err(error),
                }
            }
            Err(error) => Err(error),
        }
    }
}
