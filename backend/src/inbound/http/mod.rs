//! HTTP inbound adapter exposing REST endpoints.
//!
//! Every resource lives under `/api/v1`; handlers depend only on the
//! driving ports held by [`state::HttpState`].

pub mod comments;
pub mod error;
pub mod health;
pub mod posts;
pub mod state;
pub mod tags;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::{Scope, web};

pub use error::{ApiResult, json_config, path_config, query_config};

/// The `/api/v1` scope with every resource route registered.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use blog_backend::inbound::http::api_scope;
///
/// let app = App::new().service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .service(users::create_user)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(posts::create_post)
        .service(posts::list_posts)
        .service(posts::list_posts_by_author)
        .service(posts::get_post)
        .service(posts::update_post)
        .service(posts::delete_post)
        .service(comments::create_comment)
        .service(comments::list_comments)
        .service(comments::get_comment)
        .service(comments::update_comment)
        .service(comments::delete_comment)
        .service(tags::create_tag)
        .service(tags::list_tags)
        .service(tags::get_tag)
        .service(tags::update_tag)
        .service(tags::delete_tag)
}
