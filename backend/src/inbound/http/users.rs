//! Users API handlers.
//!
//! ```text
//! POST   /api/v1/users {"name":"Ada","email":"ada@example.com"}
//! GET    /api/v1/users
//! GET    /api/v1/users/{id}
//! PATCH  /api/v1/users/{id} {"bio":null}
//! DELETE /api/v1/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};

use crate::domain::{NewUser, RemovalReceipt, User, UserChanges, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Register a user.
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<NewUser>,
) -> ApiResult<HttpResponse> {
    let user = state.users.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

/// List every user.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use blog_backend::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users_query.find_all().await?;
    Ok(web::Json(users))
}

#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<User>> {
    let user = state
        .users_query
        .find_one(UserId::new(path.into_inner()))
        .await?;
    Ok(web::Json(user))
}

/// Apply a partial update. `imageUrl` and `bio` accept `null` to clear.
#[patch("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UserChanges>,
) -> ApiResult<web::Json<User>> {
    let user = state
        .users
        .update(UserId::new(path.into_inner()), payload.into_inner())
        .await?;
    Ok(web::Json(user))
}

#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<RemovalReceipt>> {
    let receipt = state.users.remove(UserId::new(path.into_inner())).await?;
    Ok(web::Json(receipt))
}
