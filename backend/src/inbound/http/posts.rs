//! Posts API handlers.
//!
//! ```text
//! POST   /api/v1/posts {"title":"..","body":"..","authorId":1,"tags":["rust"]}
//! GET    /api/v1/posts?page=2&limit=5&authorId=1&tag=rust
//! GET    /api/v1/posts/{id}
//! GET    /api/v1/posts/author/{authorId}
//! PATCH  /api/v1/posts/{id} {"tags":[]}
//! DELETE /api/v1/posts/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use pagination::{PageRequest, Paginated};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{
    Error, NewPost, PostChanges, PostDetail, PostFilter, PostId, PostSummary, RemovalReceipt,
    UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Query string accepted by `GET /posts`.
///
/// `page` and `limit` stay raw so that junk values are clamped by
/// [`PageRequest::parse`] instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub author_id: Option<String>,
    pub tag: Option<String>,
}

impl PostListQuery {
    fn page_request(&self) -> PageRequest {
        PageRequest::parse(self.page.as_deref(), self.limit.as_deref())
    }

    fn filter(&self) -> Result<PostFilter, Error> {
        let author_id = match self.author_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<i32>().map(UserId::new).map_err(|_| {
                Error::invalid_request("authorId must be an integer")
                    .with_details(json!({ "field": "authorId", "value": raw }))
            })?),
        };
        let tag = self
            .tag
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_owned);
        Ok(PostFilter { author_id, tag })
    }
}

/// Create a post, reconciling its tag names.
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    payload: web::Json<NewPost>,
) -> ApiResult<HttpResponse> {
    let post = state.posts.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(post))
}

/// One page of post summaries, newest first.
#[get("/posts")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    query: web::Query<PostListQuery>,
) -> ApiResult<web::Json<Paginated<PostSummary>>> {
    let filter = query.filter()?;
    let page = state
        .posts_query
        .find_all(filter, query.page_request())
        .await?;
    Ok(web::Json(page))
}

#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<PostDetail>> {
    let post = state
        .posts_query
        .find_one(PostId::new(path.into_inner()))
        .await?;
    Ok(web::Json(post))
}

/// Every post by one author, unpaginated.
#[get("/posts/author/{author_id}")]
pub async fn list_posts_by_author(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Vec<PostSummary>>> {
    let posts = state
        .posts_query
        .find_by_author(UserId::new(path.into_inner()))
        .await?;
    Ok(web::Json(posts))
}

/// Partial update. `tags` replaces the whole set when present.
#[patch("/posts/{id}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<PostChanges>,
) -> ApiResult<web::Json<PostDetail>> {
    let post = state
        .posts
        .update(PostId::new(path.into_inner()), payload.into_inner())
        .await?;
    Ok(web::Json(post))
}

#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<RemovalReceipt>> {
    let receipt = state.posts.remove(PostId::new(path.into_inner())).await?;
    Ok(web::Json(receipt))
}
