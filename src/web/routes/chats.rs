use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::chat_service;
use crate::web::middleware::auth::AuthenticatedMember;

pub async fn list_chats_handler(
    Extension(auth): Extension<AuthenticatedMember>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    match chat_service::list_chats_for_member(&pool, &auth.member_id).await {
        Ok(Some(chats)) => Json(chats).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!("Chat list failed for {}: {}", auth.member_id, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn can_send_handler(
    Extension(auth): Extension<AuthenticatedMember>,
    Path(chat_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    match chat_service::can_member_send_message(&pool, &auth.member_id, &chat_id).await {
        Ok(Some(can_send)) => Json(serde_json::json!({ "can_send": can_send })).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!("Chat permission check failed for {}: {}", chat_id, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
