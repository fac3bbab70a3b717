//! Tags API handlers.
//!
//! Tags are also created implicitly when posts name them; these routes
//! manage the vocabulary directly.

use actix_web::{HttpResponse, delete, get, patch, post, web};

use crate::domain::{NewTag, RemovalReceipt, Tag, TagChanges, TagId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

#[post("/tags")]
pub async fn create_tag(
    state: web::Data<HttpState>,
    payload: web::Json<NewTag>,
) -> ApiResult<HttpResponse> {
    let tag = state.tags.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(tag))
}

#[get("/tags")]
pub async fn list_tags(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Tag>>> {
    let tags = state.tags_query.find_all().await?;
    Ok(web::Json(tags))
}

#[get("/tags/{id}")]
pub async fn get_tag(state: web::Data<HttpState>, path: web::Path<i32>) -> ApiResult<web::Json<Tag>> {
    let tag = state
        .tags_query
        .find_one(TagId::new(path.into_inner()))
        .await?;
    Ok(web::Json(tag))
}

#[patch("/tags/{id}")]
pub async fn update_tag(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<TagChanges>,
) -> ApiResult<web::Json<Tag>> {
    let tag = state
        .tags
        .update(TagId::new(path.into_inner()), payload.into_inner())
        .await?;
    Ok(web::Json(tag))
}

/// Remove a tag; its post links go with it.
#[delete("/tags/{id}")]
pub async fn delete_tag(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<RemovalReceipt>> {
    let receipt = state.tags.remove(TagId::new(path.into_inner())).await?;
    Ok(web::Json(receipt))
}
