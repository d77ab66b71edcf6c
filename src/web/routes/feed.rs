use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::feed_service;
use crate::web::middleware::auth::AuthenticatedMember;

pub async fn list_feed_handler(
    Extension(auth): Extension<AuthenticatedMember>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    match feed_service::list_feed_for_member(&pool, &auth.member_id).await {
        Ok(Some(posts)) => Json(posts).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!("Feed load failed for {}: {}", auth.member_id, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn create_post_handler(
    Extension(auth): Extension<AuthenticatedMember>,
    State(pool): State<SqlitePool>,
    Json(input): Json<feed_service::NewPostInput>,
) -> impl IntoResponse {
    if input.title.trim().is_empty() || input.body.trim().is_empty() {
        return StatusCode::BAD_REQUEST.into_response();
    }

    match feed_service::create_post(&pool, &auth.choir_id, &input).await {
        Ok(post_id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "post_id": post_id })),
        )
            .into_response(),
        Err(e) => {
            warn!("Post create failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
