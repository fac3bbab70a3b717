//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the entity store ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories translate between Diesel rows and
//!   domain records. Relationship rules live in the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Batched projections**: related rows are loaded per batch by
//!   `related_loaders` and assembled by the domain's `RelatedRecords`.
//! - **Classified errors**: every pool and Diesel failure becomes a
//!   [`crate::domain::ports::StoreError`].
//!
//! # Example
//!
//! ```ignore
//! use blog_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/blog")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_comment_repository;
mod diesel_error_mapping;
mod diesel_post_repository;
mod diesel_tag_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod related_loaders;
mod schema;

pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_tag_repository::DieselTagRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError, PoolStats};
