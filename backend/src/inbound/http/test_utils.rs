//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::domain::ports::{PostCommand, UserRepository};
use crate::domain::{NewPost, NewUser, PostDetail, PostService, User, UserId};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{api_scope, json_config, path_config, query_config};
use crate::test_support::InMemoryStore;

/// Build the `/api/v1` application over an in-memory store.
///
/// Clones of `store` share its rows, so tests can seed and inspect state
/// through the handle they pass in.
pub fn test_app(
    store: &InMemoryStore,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let shared = Arc::new(store.clone());
    let state = HttpState::from_repositories(
        shared.clone(),
        shared.clone(),
        shared.clone(),
        shared,
    );
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .wrap(Trace)
        .service(api_scope())
}

/// Insert a user named `name` with a derived e-mail address.
pub async fn seed_user(store: &InMemoryStore, name: &str) -> User {
    store
        .create(NewUser {
            name: name.to_owned(),
            email: format!("{}@example.com", name.to_lowercase()),
            image_url: None,
            bio: Some(format!("{name} writes here")),
        })
        .await
        .expect("seed user")
}

/// Insert a post through the post service so tag names are reconciled.
pub async fn seed_post(
    store: &InMemoryStore,
    author_id: UserId,
    title: &str,
    tags: &[&str],
) -> PostDetail {
    let shared = Arc::new(store.clone());
    PostService::new(shared.clone(), shared)
        .create(NewPost {
            title: title.to_owned(),
            body: format!("{title} body"),
            author_id,
            tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
        })
        .await
        .expect("seed post")
}
