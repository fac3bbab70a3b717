//! Comments API handlers.
//!
//! ```text
//! POST   /api/v1/comments {"body":"..","authorId":1,"postId":3}
//! GET    /api/v1/comments
//! GET    /api/v1/comments/{id}
//! PATCH  /api/v1/comments/{id} {"body":".."}
//! DELETE /api/v1/comments/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};

use crate::domain::{CommentChanges, CommentId, CommentView, NewComment, RemovalReceipt};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

#[post("/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    payload: web::Json<NewComment>,
) -> ApiResult<HttpResponse> {
    let comment = state.comments.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(comment))
}

#[get("/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CommentView>>> {
    let comments = state.comments_query.find_all().await?;
    Ok(web::Json(comments))
}

#[get("/comments/{id}")]
pub async fn get_comment(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<CommentView>> {
    let comment = state
        .comments_query
        .find_one(CommentId::new(path.into_inner()))
        .await?;
    Ok(web::Json(comment))
}

#[patch("/comments/{id}")]
pub async fn update_comment(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<CommentChanges>,
) -> ApiResult<web::Json<CommentView>> {
    let comment = state
        .comments
        .update(CommentId::new(path.into_inner()), payload.into_inner())
        .await?;
    Ok(web::Json(comment))
}

#[delete("/comments/{id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<RemovalReceipt>> {
    let receipt = state
        .comments
        .remove(CommentId::new(path.into_inner()))
        .await?;
    Ok(web::Json(receipt))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{seed_post, seed_user, test_app};
    use crate::test_support::InMemoryStore;

    #[actix_web::test]
    async fn create_returns_summary_with_compact_author_and_post_link() {
        let store = InMemoryStore::default();
        let ada = seed_user(&store, "Ada").await;
        let post = seed_post(&store, ada.id, "Hello", &[]).await;
        let app = actix_test::init_service(test_app(&store)).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/v1/comments")
            .set_json(json!({"body": "Nice", "authorId": ada.id, "postId": post.post.id}))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["body"], "Nice");
        assert_eq!(body["post"], json!({"id": post.post.id, "title": "Hello"}));
        assert!(body["author"].get("email").is_none());
    }

    #[actix_web::test]
    async fn single_read_uses_contact_author() {
        let store = InMemoryStore::default();
        let ada = seed_user(&store, "Ada").await;
        let post = seed_post(&store, ada.id, "Hello", &[]).await;
        let app = actix_test::init_service(test_app(&store)).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/comments")
            .set_json(json!({"body": "Nice", "authorId": ada.id, "postId": post.post.id}))
            .to_request();
        let created: Value = actix_test::call_and_read_body_json(&app, req).await;

        let req = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/comments/{}", created["id"]))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["author"]["email"], "ada@example.com");
    }

    #[actix_web::test]
    async fn comment_on_missing_post_is_a_conflict() {
        let store = InMemoryStore::default();
        let ada = seed_user(&store, "Ada").await;
        let app = actix_test::init_service(test_app(&store)).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/v1/comments")
            .set_json(json!({"body": "Lost", "authorId": ada.id, "postId": 40}))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["constraint"], "comments_post_id_fkey");
    }

    #[actix_web::test]
    async fn patch_and_delete_round_out_the_lifecycle() {
        let store = InMemoryStore::default();
        let ada = seed_user(&store, "Ada").await;
        let post = seed_post(&store, ada.id, "Hello", &[]).await;
        let app = actix_test::init_service(test_app(&store)).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/comments")
            .set_json(json!({"body": "Draft", "authorId": ada.id, "postId": post.post.id}))
            .to_request();
        let created: Value = actix_test::call_and_read_body_json(&app, req).await;
        let uri = format!("/api/v1/comments/{}", created["id"]);

        let req = actix_test::TestRequest::patch()
            .uri(&uri)
            .set_json(json!({"body": "Final"}))
            .to_request();
        let updated: Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["body"], "Final");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete().uri(&uri).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(store.comment_count(), 0);

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(&uri).to_request())
                .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
