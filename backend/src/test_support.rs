//! Test utilities for the backend crate.
//!
//! [`InMemoryStore`] implements all four entity store ports over shared
//! in-process state. It enforces the same unique, foreign-key, restrict,
//! and cascade rules as the PostgreSQL schema and reports violations under
//! the same constraint names, so service and HTTP tests observe the same
//! failures they would against a database.
//!
//! Timestamps come from a logical clock that advances one second per write,
//! keeping orderings deterministic.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use pagination::PageWindow;

use crate::domain::ports::{
    CommentRepository, ConstraintKind, PostRepository, StoreError, TagRepository, UserRepository,
};
use crate::domain::{
    Comment, CommentChanges, CommentId, CommentView, NewComment, NewTag, NewUser, Post,
    PostDetail, PostFieldChanges, PostFields, PostFilter, PostId, PostSummary, ProjectionProfile,
    RelatedRecords, Tag, TagChanges, TagId, TagLinkPlan, User, UserChanges, UserId, WindowedRows,
};

const CLOCK_BASE_SECONDS: i64 = 1_700_000_000;

/// Per-table id sequences, like `SERIAL` columns.
#[derive(Debug, Default)]
struct Sequences {
    users: i32,
    posts: i32,
    comments: i32,
    tags: i32,
}

fn next_value(sequence: &mut i32) -> i32 {
    *sequence += 1;
    *sequence
}

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<UserId, User>,
    posts: BTreeMap<PostId, Post>,
    comments: BTreeMap<CommentId, Comment>,
    tags: BTreeMap<TagId, Tag>,
    post_tags: BTreeSet<(PostId, TagId)>,
    sequences: Sequences,
    tick: i64,
    unavailable: bool,
}

fn unique(constraint: &str) -> StoreError {
    StoreError::constraint_violation(ConstraintKind::Unique, constraint)
}

fn foreign_key(constraint: &str) -> StoreError {
    StoreError::constraint_violation(ConstraintKind::ForeignKey, constraint)
}

impl State {
    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::unavailable("in-memory store marked unavailable"));
        }
        Ok(())
    }

    fn now(&mut self) -> DateTime<Utc> {
        self.tick += 1;
        Utc.timestamp_opt(CLOCK_BASE_SECONDS + self.tick, 0)
            .single()
            .unwrap_or_default()
    }

    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|user| user.email == email && Some(user.id) != except)
    }

    fn tag_name_taken(&self, name: &str, except: Option<TagId>) -> bool {
        self.tags
            .values()
            .any(|tag| tag.name == name && Some(tag.id) != except)
    }

    fn ensure_tags_exist(&self, tag_ids: &[TagId]) -> Result<(), StoreError> {
        if tag_ids.iter().all(|id| self.tags.contains_key(id)) {
            Ok(())
        } else {
            Err(foreign_key("post_tags_tag_id_fkey"))
        }
    }

    fn replace_links(&mut self, post_id: PostId, tag_ids: &[TagId]) {
        self.post_tags.retain(|(linked, _)| *linked != post_id);
        self.post_tags
            .extend(tag_ids.iter().map(|tag_id| (post_id, *tag_id)));
    }

    fn related(&self) -> RelatedRecords {
        let mut counts: BTreeMap<PostId, u64> = BTreeMap::new();
        for comment in self.comments.values() {
            *counts.entry(comment.post_id).or_default() += 1;
        }
        RelatedRecords::default()
            .with_users(self.users.values().cloned())
            .with_post_tags(self.post_tags.iter().filter_map(|(post_id, tag_id)| {
                self.tags.get(tag_id).map(|tag| (*post_id, tag.clone()))
            }))
            .with_comment_counts(counts)
            .with_comments(self.comments.values().cloned())
            .with_post_links(self.posts.values().map(Into::into))
    }

    fn detail(&self, post_id: PostId) -> Result<PostDetail, StoreError> {
        let post = self
            .posts
            .get(&post_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("post {post_id}")))?;
        Ok(self.related().post_detail(post)?)
    }

    fn comment_view(
        &self,
        comment_id: CommentId,
        profile: ProjectionProfile,
    ) -> Result<CommentView, StoreError> {
        let comment = self
            .comments
            .get(&comment_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("comment {comment_id}")))?;
        Ok(self.related().comment_view(comment, profile)?)
    }

    /// Filtered posts, newest first.
    fn filtered_posts(&self, filter: &PostFilter) -> Vec<Post> {
        let tag_id = filter.tag.as_ref().map(|name| {
            self.tags
                .values()
                .find(|tag| &tag.name == name)
                .map(|tag| tag.id)
        });
        let mut posts: Vec<Post> = self
            .posts
            .values()
            .filter(|post| filter.author_id.is_none_or(|author| post.author_id == author))
            .filter(|post| match tag_id {
                None => true,
                Some(None) => false,
                Some(Some(tag_id)) => self.post_tags.contains(&(post.id, tag_id)),
            })
            .cloned()
            .collect();
        posts.sort_by(|left, right| {
            right
                .created_at
                .cmp(&left.created_at)
                .then(right.id.cmp(&left.id))
        });
        posts
    }
}

/// Shared in-process implementation of every entity store port.
///
/// Clones share state, so one store can back all four ports at once.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    pub fn post_count(&self) -> usize {
        self.lock().posts.len()
    }

    pub fn comment_count(&self) -> usize {
        self.lock().comments.len()
    }

    pub fn tag_count(&self) -> usize {
        self.lock().tags.len()
    }

    /// Tag ids currently linked to `post_id`.
    pub fn linked_tag_ids(&self, post_id: PostId) -> Vec<TagId> {
        self.lock()
            .post_tags
            .iter()
            .filter(|(linked, _)| *linked == post_id)
            .map(|(_, tag_id)| *tag_id)
            .collect()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut state = self.lock();
        state.ensure_available()?;
        if state.email_taken(&user.email, None) {
            return Err(unique("users_email_key"));
        }
        let stored = User {
            id: UserId::new(next_value(&mut state.sequences.users)),
            name: user.name,
            email: user.email,
            image_url: user.image_url,
            bio: user.bio,
        };
        state.users.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let state = self.lock();
        state.ensure_available()?;
        Ok(state.users.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let state = self.lock();
        state.ensure_available()?;
        Ok(state.users.values().cloned().collect())
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> Result<User, StoreError> {
        let mut state = self.lock();
        state.ensure_available()?;
        let email_clash = changes
            .email
            .as_deref()
            .is_some_and(|email| state.email_taken(email, Some(id)));
        if email_clash {
            return Err(unique("users_email_key"));
        }
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(format!("user {id}")))?;
        changes.apply_to(user);
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.ensure_available()?;
        if !state.users.contains_key(&id) {
            return Err(StoreError::not_found(format!("user {id}")));
        }
        if state.posts.values().any(|post| post.author_id == id) {
            return Err(foreign_key("posts_author_id_fkey"));
        }
        if state.comments.values().any(|comment| comment.author_id == id) {
            return Err(foreign_key("comments_author_id_fkey"));
        }
        state.users.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn create(&self, tag: NewTag) -> Result<Tag, StoreError> {
        let mut state = self.lock();
        state.ensure_available()?;
        if state.tag_name_taken(&tag.name, None) {
            return Err(unique("tags_name_key"));
        }
        let stored = Tag {
            id: TagId::new(next_value(&mut state.sequences.tags)),
            name: tag.name,
        };
        state.tags.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: TagId) -> Result<Option<Tag>, StoreError> {
        let state = self.lock();
        state.ensure_available()?;
        Ok(state.tags.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, StoreError> {
        let state = self.lock();
        state.ensure_available()?;
        Ok(state.tags.values().find(|tag| tag.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<Tag>, StoreError> {
        let state = self.lock();
        state.ensure_available()?;
        let mut tags: Vec<Tag> = state.tags.values().cloned().collect();
        tags.sort_by(|left, right| left.name.cmp(&right.name).then(left.id.cmp(&right.id)));
        Ok(tags)
    }

    async fn rename(&self, id: TagId, changes: TagChanges) -> Result<Tag, StoreError> {
        let mut state = self.lock();
        state.ensure_available()?;
        let name_clash = changes
            .name
            .as_deref()
            .is_some_and(|name| state.tag_name_taken(name, Some(id)));
        if name_clash {
            return Err(unique("tags_name_key"));
        }
        let tag = state
            .tags
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(format!("tag {id}")))?;
        if let Some(name) = changes.name {
            tag.name = name;
        }
        Ok(tag.clone())
    }

    async fn delete(&self, id: TagId) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.ensure_available()?;
        if state.tags.remove(&id).is_none() {
            return Err(StoreError::not_found(format!("tag {id}")));
        }
        state.post_tags.retain(|(_, tag_id)| *tag_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn create(
        &self,
        post: PostFields,
        tag_ids: Vec<TagId>,
    ) -> Result<PostDetail, StoreError> {
        let mut state = self.lock();
        state.ensure_available()?;
        if !state.users.contains_key(&post.author_id) {
            return Err(foreign_key("posts_author_id_fkey"));
        }
        state.ensure_tags_exist(&tag_ids)?;
        let created_at = state.now();
        let stored = Post {
            id: PostId::new(next_value(&mut state.sequences.posts)),
            title: post.title,
            body: post.body,
            author_id: post.author_id,
            created_at,
            updated_at: created_at,
        };
        let post_id = stored.id;
        state.posts.insert(post_id, stored);
        state.replace_links(post_id, &tag_ids);
        state.detail(post_id)
    }

    async fn find_detail(&self, id: PostId) -> Result<Option<PostDetail>, StoreError> {
        let state = self.lock();
        state.ensure_available()?;
        if !state.posts.contains_key(&id) {
            return Ok(None);
        }
        state.detail(id).map(Some)
    }

    async fn list_page(
        &self,
        filter: &PostFilter,
        window: PageWindow,
    ) -> Result<WindowedRows<PostSummary>, StoreError> {
        let state = self.lock();
        state.ensure_available()?;
        let posts = state.filtered_posts(filter);
        let total = u64::try_from(posts.len()).unwrap_or(u64::MAX);
        let summaries = state.related().post_summaries(window.apply(posts))?;
        Ok(WindowedRows::new(summaries, total))
    }

    async fn list_summaries(&self, filter: &PostFilter) -> Result<Vec<PostSummary>, StoreError> {
        let state = self.lock();
        state.ensure_available()?;
        let posts = state.filtered_posts(filter);
        Ok(state.related().post_summaries(posts)?)
    }

    async fn update(
        &self,
        id: PostId,
        changes: PostFieldChanges,
        links: TagLinkPlan,
    ) -> Result<PostDetail, StoreError> {
        let mut state = self.lock();
        state.ensure_available()?;
        if !state.posts.contains_key(&id) {
            return Err(StoreError::not_found(format!("post {id}")));
        }
        let unknown_author = changes
            .author_id
            .is_some_and(|author_id| !state.users.contains_key(&author_id));
        if unknown_author {
            return Err(foreign_key("posts_author_id_fkey"));
        }
        if let TagLinkPlan::Replace(tag_ids) = &links {
            state.ensure_tags_exist(tag_ids)?;
        }
        let updated_at = state.now();
        if let Some(post) = state.posts.get_mut(&id) {
            changes.apply_to(post);
            post.updated_at = updated_at;
        }
        if let TagLinkPlan::Replace(tag_ids) = &links {
            state.replace_links(id, tag_ids);
        }
        state.detail(id)
    }

    async fn delete(&self, id: PostId) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.ensure_available()?;
        if state.posts.remove(&id).is_none() {
            return Err(StoreError::not_found(format!("post {id}")));
        }
        state.comments.retain(|_, comment| comment.post_id != id);
        state.post_tags.retain(|(post_id, _)| *post_id != id);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn create(&self, comment: NewComment) -> Result<CommentView, StoreError> {
        let mut state = self.lock();
        state.ensure_available()?;
        if !state.users.contains_key(&comment.author_id) {
            return Err(foreign_key("comments_author_id_fkey"));
        }
        if !state.posts.contains_key(&comment.post_id) {
            return Err(foreign_key("comments_post_id_fkey"));
        }
        let created_at = state.now();
        let stored = Comment {
            id: CommentId::new(next_value(&mut state.sequences.comments)),
            body: comment.body,
            author_id: comment.author_id,
            post_id: comment.post_id,
            created_at,
        };
        let comment_id = stored.id;
        state.comments.insert(comment_id, stored);
        state.comment_view(comment_id, ProjectionProfile::Summary)
    }

    async fn find(
        &self,
        id: CommentId,
        profile: ProjectionProfile,
    ) -> Result<Option<CommentView>, StoreError> {
        let state = self.lock();
        state.ensure_available()?;
        if !state.comments.contains_key(&id) {
            return Ok(None);
        }
        state.comment_view(id, profile).map(Some)
    }

    async fn list(&self) -> Result<Vec<CommentView>, StoreError> {
        let state = self.lock();
        state.ensure_available()?;
        let mut comments: Vec<Comment> = state.comments.values().cloned().collect();
        comments.sort_by(|left, right| {
            left.created_at
                .cmp(&right.created_at)
                .then(left.id.cmp(&right.id))
        });
        Ok(state
            .related()
            .comment_views(comments, ProjectionProfile::Summary)?)
    }

    async fn update(
        &self,
        id: CommentId,
        changes: CommentChanges,
    ) -> Result<CommentView, StoreError> {
        let mut state = self.lock();
        state.ensure_available()?;
        let comment = state
            .comments
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(format!("comment {id}")))?;
        if let Some(body) = changes.body {
            comment.body = body;
        }
        state.comment_view(id, ProjectionProfile::Summary)
    }

    async fn delete(&self, id: CommentId) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.ensure_available()?;
        if state.comments.remove(&id).is_none() {
            return Err(StoreError::not_found(format!("comment {id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Constraint enforcement and the concurrent tag race.

    use super::*;
    use crate::domain::ports::PostCommand;
    use crate::domain::{NewPost, PostService, TagReconciler};
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryStore {
        InMemoryStore::new()
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ada".into(),
            email: email.into(),
            image_url: None,
            bio: None,
        }
    }

    fn fields(author_id: UserId) -> PostFields {
        PostFields {
            title: "Hello".into(),
            body: "World".into(),
            author_id,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation(store: InMemoryStore) {
        UserRepository::create(&store, new_user("ada@example.com"))
            .await
            .expect("first user");
        let err = UserRepository::create(&store, new_user("ada@example.com"))
            .await
            .expect_err("duplicate email");
        assert!(err.is_unique_violation());
        assert_eq!(err.constraint(), Some("users_email_key"));
    }

    #[rstest]
    #[tokio::test]
    async fn author_with_posts_cannot_be_deleted(store: InMemoryStore) {
        let author = UserRepository::create(&store, new_user("ada@example.com"))
            .await
            .expect("user");
        PostRepository::create(&store, fields(author.id), Vec::new())
            .await
            .expect("post");
        let err = UserRepository::delete(&store, author.id)
            .await
            .expect_err("restricted");
        assert_eq!(err.constraint(), Some("posts_author_id_fkey"));
        assert_eq!(store.user_count(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_post_cascades(store: InMemoryStore) {
        let author = UserRepository::create(&store, new_user("ada@example.com"))
            .await
            .expect("user");
        let tag = TagRepository::create(&store, NewTag { name: "rust".into() })
            .await
            .expect("tag");
        let post = PostRepository::create(&store, fields(author.id), vec![tag.id])
            .await
            .expect("post");
        CommentRepository::create(
            &store,
            NewComment {
                body: "Nice".into(),
                author_id: author.id,
                post_id: post.post.id,
            },
        )
        .await
        .expect("comment");

        PostRepository::delete(&store, post.post.id)
            .await
            .expect("delete");
        assert_eq!(store.comment_count(), 0);
        assert!(store.linked_tag_ids(post.post.id).is_empty());
        assert_eq!(store.tag_count(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_author_is_a_foreign_key_violation(store: InMemoryStore) {
        let err = PostRepository::create(&store, fields(UserId::new(99)), Vec::new())
            .await
            .expect_err("unknown author");
        assert!(matches!(
            err,
            StoreError::ConstraintViolation {
                kind: ConstraintKind::ForeignKey,
                ..
            }
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn unavailable_store_fails_every_call(store: InMemoryStore) {
        store.set_unavailable(true);
        let err = UserRepository::list(&store).await.expect_err("down");
        assert!(matches!(err, StoreError::Unavailable { .. }));
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_reconciliation_creates_one_tag(store: InMemoryStore) {
        let shared = Arc::new(store.clone());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tags = Arc::clone(&shared);
                tokio::spawn(async move { TagReconciler::new(tags).resolve(&["shared"]).await })
            })
            .collect();

        let mut resolved = BTreeSet::new();
        for handle in handles {
            let ids = handle.await.expect("task").expect("resolve");
            resolved.extend(ids);
        }
        assert_eq!(resolved.len(), 1);
        assert_eq!(store.tag_count(), 1);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_posts_share_one_new_tag(store: InMemoryStore) {
        let author_id = UserRepository::create(&store, new_user("ada@example.com"))
            .await
            .expect("user")
            .id;
        let shared = Arc::new(store.clone());
        let service = Arc::new(PostService::new(Arc::clone(&shared), shared));
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    service
                        .create(NewPost {
                            title: format!("Post {n}"),
                            body: "..".into(),
                            author_id,
                            tags: vec!["shared".into(), "shared".into()],
                        })
                        .await
                })
            })
            .collect();

        let mut post_ids = Vec::new();
        for handle in handles {
            let detail = handle.await.expect("task").expect("create post");
            post_ids.push(detail.post.id);
        }

        assert_eq!(store.tag_count(), 1);
        assert_eq!(store.post_count(), 8);
        let links: Vec<TagId> = post_ids
            .iter()
            .flat_map(|id| store.linked_tag_ids(*id))
            .collect();
        assert_eq!(links.len(), 8);
        let distinct: BTreeSet<TagId> = links.into_iter().collect();
        assert_eq!(distinct.len(), 1);
    }
}
