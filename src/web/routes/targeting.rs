use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::targeting_service::{self, TargetSpec, TargetingInput};
use crate::web::middleware::auth::AuthenticatedMember;

#[derive(Serialize)]
pub struct PreviewMemberView {
    pub member_id: String,
    pub name: String,
}

#[derive(Serialize)]
pub struct TargetingPreviewView {
    pub voice_group_ids: Vec<String>,
    pub voice_type_ids: Vec<String>,
    pub eligible_count: usize,
    pub members: Vec<PreviewMemberView>,
}

// The event/post forms call this to show "N members will be addressed"
// before anything is stored.
pub async fn preview_handler(
    Extension(auth): Extension<AuthenticatedMember>,
    State(pool): State<SqlitePool>,
    Json(input): Json<TargetingInput>,
) -> impl IntoResponse {
    match build_preview(&pool, &auth.choir_id, &input).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => {
            warn!("Targeting preview failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn build_preview(
    pool: &SqlitePool,
    choir_id: &str,
    input: &TargetingInput,
) -> sqlx::Result<TargetingPreviewView> {
    let mut conn = pool.acquire().await?;

    let expanded = targeting_service::expand_targets(
        &mut conn,
        choir_id,
        &input.target_voice_groups,
        &input.target_voice_types,
    )
    .await?;

    let target = TargetSpec {
        include_all_active: input.include_all_active,
        membership_type_ids: input.target_membership_types.iter().cloned().collect(),
        voice_group_ids: expanded.voice_group_ids.iter().cloned().collect(),
        voice_type_ids: expanded.voice_type_ids.iter().cloned().collect(),
    };
    let eligible = targeting_service::get_eligible_members(&mut conn, choir_id, &target).await?;

    Ok(TargetingPreviewView {
        voice_group_ids: expanded.voice_group_ids,
        voice_type_ids: expanded.voice_type_ids,
        eligible_count: eligible.len(),
        members: eligible
            .into_iter()
            .map(|m| PreviewMemberView {
                member_id: m.member_id,
                name: m.name,
            })
            .collect(),
    })
}
