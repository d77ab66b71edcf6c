use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::targeting_service::TargetingInput;
use crate::services::{attendance_service, attendance_summary_service, event_service};
use crate::web::middleware::auth::AuthenticatedMember;

pub async fn list_events_handler(
    Extension(auth): Extension<AuthenticatedMember>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    match event_service::list_events_for_member(&pool, &auth.member_id).await {
        Ok(Some(cards)) => Json(cards).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!("Event list failed for {}: {}", auth.member_id, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn create_event_handler(
    Extension(auth): Extension<AuthenticatedMember>,
    State(pool): State<SqlitePool>,
    Json(input): Json<event_service::NewEventInput>,
) -> impl IntoResponse {
    if input.attendance_mode != "opt_in" && input.attendance_mode != "opt_out" {
        return StatusCode::BAD_REQUEST.into_response();
    }
    if input.title.trim().is_empty() {
        return StatusCode::BAD_REQUEST.into_response();
    }

    match event_service::create_event(&pool, &auth.choir_id, &auth.member_id, &input).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => {
            warn!("Event create failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn update_targeting_handler(
    Extension(auth): Extension<AuthenticatedMember>,
    Path(event_id): Path<String>,
    State(pool): State<SqlitePool>,
    Json(targeting): Json<TargetingInput>,
) -> impl IntoResponse {
    match event_service::update_event_targeting(&pool, &auth.choir_id, &event_id, &targeting).await
    {
        Ok(Some(created)) => Json(serde_json::json!({
            "event_id": event_id,
            "attendance_rows_created": created
        }))
        .into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!("Targeting update failed for {}: {}", event_id, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn attendance_roster_handler(
    Extension(auth): Extension<AuthenticatedMember>,
    Path(event_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    match attendance_service::load_event_roster(&pool, &auth.choir_id, &event_id).await {
        Ok(Some(roster)) => Json(roster).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!("Roster load failed for {}: {}", event_id, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn attendance_summary_handler(
    Extension(auth): Extension<AuthenticatedMember>,
    Path(event_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    match attendance_summary_service::load_event_attendance_summary(
        &pool,
        &auth.choir_id,
        &event_id,
    )
    .await
    {
        Ok(Some(view)) => Json(view).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!("Attendance summary failed for {}: {}", event_id, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RsvpForm {
    pub intended_status: String, // attending|not_attending|tentative
    pub intended_reason: Option<String>,
}

pub async fn rsvp_handler(
    Extension(auth): Extension<AuthenticatedMember>,
    Path(event_id): Path<String>,
    State(pool): State<SqlitePool>,
    Json(form): Json<RsvpForm>,
) -> impl IntoResponse {
    let status = form.intended_status.as_str();
    if status != "attending" && status != "not_attending" && status != "tentative" {
        return StatusCode::BAD_REQUEST.into_response();
    }

    match attendance_service::set_intended_status(
        &pool,
        &auth.choir_id,
        &event_id,
        &auth.member_id,
        status,
        form.intended_reason.as_deref(),
    )
    .await
    {
        Ok(true) => Json(serde_json::json!({ "status": "ok" })).into_response(),
        Ok(false) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!("Rsvp failed for {}: {}", event_id, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MarkAttendanceForm {
    pub member_id: String,
    pub actual_status: String, // present|absent|late
}

pub async fn mark_attendance_handler(
    Extension(auth): Extension<AuthenticatedMember>,
    Path(event_id): Path<String>,
    State(pool): State<SqlitePool>,
    Json(form): Json<MarkAttendanceForm>,
) -> impl IntoResponse {
    let status = form.actual_status.as_str();
    if status != "present" && status != "absent" && status != "late" {
        return StatusCode::BAD_REQUEST.into_response();
    }

    match attendance_service::record_actual_status(
        &pool,
        &auth.choir_id,
        &event_id,
        &form.member_id,
        status,
        &auth.member_id,
    )
    .await
    {
        Ok(true) => Json(serde_json::json!({ "status": "ok" })).into_response(),
        Ok(false) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!("Mark attendance failed for {}: {}", event_id, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
