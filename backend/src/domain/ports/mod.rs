//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by the Diesel adapters and
//! the in-memory store; driving ports (`*Command`, `*Query`) are implemented
//! by the services and consumed by the HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod comment_command;
mod comment_query;
mod comment_repository;
mod post_command;
mod post_query;
mod post_repository;
mod store_error;
mod tag_command;
mod tag_query;
mod tag_repository;
mod user_command;
mod user_query;
mod user_repository;

pub use comment_command::CommentCommand;
pub use comment_query::CommentQuery;
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::CommentRepository;
pub use post_command::PostCommand;
pub use post_query::PostQuery;
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::PostRepository;
pub use store_error::{ConstraintKind, StoreError};
pub use tag_command::TagCommand;
pub use tag_query::TagQuery;
#[cfg(test)]
pub use tag_repository::MockTagRepository;
pub use tag_repository::TagRepository;
pub use user_command::UserCommand;
pub use user_query::UserQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
