//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CommentCommand, CommentQuery, CommentRepository, PostCommand, PostQuery, PostRepository,
    TagCommand, TagQuery, TagRepository, UserCommand, UserQuery, UserRepository,
};
use crate::domain::{CommentService, PostService, TagService, UserService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
    pub posts: Arc<dyn PostCommand>,
    pub posts_query: Arc<dyn PostQuery>,
    pub comments: Arc<dyn CommentCommand>,
    pub comments_query: Arc<dyn CommentQuery>,
    pub tags: Arc<dyn TagCommand>,
    pub tags_query: Arc<dyn TagQuery>,
}

impl HttpState {
    /// Wire the domain services over one set of repositories.
    ///
    /// The same service instance backs both the command and the query port
    /// of each entity.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use blog_backend::inbound::http::state::HttpState;
    /// use blog_backend::test_support::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::default());
    /// let _state = HttpState::from_repositories(
    ///     store.clone(),
    ///     store.clone(),
    ///     store.clone(),
    ///     store,
    /// );
    /// ```
    pub fn from_repositories<U, P, C, T>(
        users: Arc<U>,
        posts: Arc<P>,
        comments: Arc<C>,
        tags: Arc<T>,
    ) -> Self
    where
        U: UserRepository + 'static,
        P: PostRepository + 'static,
        C: CommentRepository + 'static,
        T: TagRepository + 'static,
    {
        let user_service = Arc::new(UserService::new(users));
        let post_service = Arc::new(PostService::new(posts, tags.clone()));
        let comment_service = Arc::new(CommentService::new(comments));
        let tag_service = Arc::new(TagService::new(tags));
        Self {
            users: user_service.clone(),
            users_query: user_service,
            posts: post_service.clone(),
            posts_query: post_service,
            comments: comment_service.clone(),
            comments_query: comment_service,
            tags: tag_service.clone(),
            tags_query: tag_service,
        }
    }
}
