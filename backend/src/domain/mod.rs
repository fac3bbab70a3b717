//! Domain types, ports, and services for the blog.
//!
//! Everything here is persistence and transport agnostic. The services own
//! the relationship rules (tag reconciliation, pagination, error
//! translation); the store adapters behind the ports only execute reads and
//! writes and assemble projections through [`RelatedRecords`].

mod comment;
mod comment_service;
mod entity;
mod error;
mod ids;
mod listing;
mod patch;
mod post;
mod post_service;
pub mod ports;
mod projection;
mod store_error_mapping;
mod tag;
mod tag_reconciliation;
mod tag_service;
mod trace_id;
mod user;
mod user_service;

pub use comment::{Comment, CommentChanges, NewComment};
pub use comment_service::CommentService;
pub use entity::{EntityKind, Operation, RemovalReceipt};
pub use error::{Error, ErrorCode, ErrorValidationError};
pub use ids::{CommentId, PostId, TagId, UserId};
pub use listing::WindowedRows;
pub use patch::Patch;
pub use post::{NewPost, Post, PostChanges, PostFieldChanges, PostFields, PostFilter};
pub use post_service::PostService;
pub use projection::{
    AuthorShape, AuthorView, CommentPreview, CommentView, DETAIL_COMMENT_LIMIT, PostDetail,
    PostLink, PostSummary, ProjectionError, ProjectionProfile, RelatedRecords, UserLink,
    referenced_post_ids, referenced_user_ids,
};
pub use tag::{NewTag, Tag, TagChanges};
pub use tag_reconciliation::{TagLinkPlan, TagReconciler, normalise_tag_names};
pub use tag_service::TagService;
pub use trace_id::{TRACE_ID_HEADER, TraceId};
pub use user::{NewUser, User, UserChanges};
pub use user_service::UserService;
