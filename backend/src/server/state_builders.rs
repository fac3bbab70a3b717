//! Builds the HTTP state from the Diesel repositories.

use std::sync::Arc;

use actix_web::web;

use blog_backend::inbound::http::state::HttpState;
use blog_backend::outbound::persistence::{
    DbPool, DieselCommentRepository, DieselPostRepository, DieselTagRepository,
    DieselUserRepository,
};

/// Every repository shares the one pool; the services are built once and
/// shared across workers.
pub(super) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    web::Data::new(HttpState::from_repositories(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselPostRepository::new(pool.clone())),
        Arc::new(DieselCommentRepository::new(pool.clone())),
        Arc::new(DieselTagRepository::new(pool.clone())),
    ))
}
