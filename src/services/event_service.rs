use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::{event_attendance_repo, event_repo, member_repo};
use crate::services::attendance_service;
use crate::services::attendance_summary_service::{self, AttendanceSummary};
use crate::services::targeting_service::{self, id_list_to_json, TargetSpec, TargetingInput};

#[derive(Debug, Deserialize)]
pub struct NewEventInput {
    pub title: String,
    pub scheduled_at: String,
    pub attendance_mode: String, // opt_in|opt_out
    #[serde(flatten)]
    pub targeting: TargetingInput,
}

#[derive(Serialize)]
pub struct CreatedEvent {
    pub event_id: String,
    pub attendance_rows_created: u64,
}

/// Creates an event with its targeting stored both raw and expanded, and
/// seeds the attendance placeholders. Expansion, insert and reconcile share
/// one transaction so a concurrent hierarchy or targeting edit cannot leave
/// the placeholders behind the stored closure.
pub async fn create_event(
    pool: &SqlitePool,
    choir_id: &str,
    created_by: &str,
    input: &NewEventInput,
) -> sqlx::Result<CreatedEvent> {
    let event_id = Uuid::new_v4().to_string();
    let mut tx = pool.begin().await?;

    let expanded = targeting_service::expand_targets(
        &mut tx,
        choir_id,
        &input.targeting.target_voice_groups,
        &input.targeting.target_voice_types,
    )
    .await?;

    event_repo::insert_event(
        &mut tx,
        event_repo::NewEvent {
            event_id: &event_id,
            choir_id,
            title: &input.title,
            scheduled_at: &input.scheduled_at,
            attendance_mode: &input.attendance_mode,
            include_all_active: input.targeting.include_all_active as i64,
            target_membership_types: &id_list_to_json(&input.targeting.target_membership_types),
            target_voice_groups: &id_list_to_json(&expanded.voice_group_ids),
            target_voice_types_selected: &id_list_to_json(&input.targeting.target_voice_types),
            target_voice_types: &id_list_to_json(&expanded.voice_type_ids),
            created_by,
        },
    )
    .await?;

    let attendance_rows_created =
        attendance_service::reconcile_event_attendance(&mut tx, &event_id)
            .await?
            .unwrap_or(0);

    tx.commit().await?;
    Ok(CreatedEvent {
        event_id,
        attendance_rows_created,
    })
}

/// Replaces an event's targeting and reconciles the placeholders in the same
/// transaction. Returns `None` when the event is unknown or belongs to
/// another choir.
pub async fn update_event_targeting(
    pool: &SqlitePool,
    choir_id: &str,
    event_id: &str,
    targeting: &TargetingInput,
) -> sqlx::Result<Option<u64>> {
    let mut tx = pool.begin().await?;

    let Some(event) = event_repo::get_event_by_id(&mut tx, event_id).await? else {
        return Ok(None);
    };
    if event.choir_id != choir_id {
        return Ok(None);
    }

    let expanded = targeting_service::expand_targets(
        &mut tx,
        choir_id,
        &targeting.target_voice_groups,
        &targeting.target_voice_types,
    )
    .await?;

    event_repo::update_event_targeting(
        &mut tx,
        event_id,
        targeting.include_all_active as i64,
        &id_list_to_json(&targeting.target_membership_types),
        &id_list_to_json(&expanded.voice_group_ids),
        &id_list_to_json(&targeting.target_voice_types),
        &id_list_to_json(&expanded.voice_type_ids),
    )
    .await?;

    let created = attendance_service::reconcile_event_attendance(&mut tx, event_id)
        .await?
        .unwrap_or(0);

    tx.commit().await?;
    Ok(Some(created))
}

#[derive(Serialize)]
pub struct EventCardView {
    pub event_id: String,
    pub title: String,
    pub scheduled_at: String,
    pub attendance_mode: String,
    pub my_intended_status: String,
    pub summary: AttendanceSummary,
}

/// "My events": the choir events the member is addressed by, each with the
/// member's own response and the aggregate counts.
pub async fn list_events_for_member(
    pool: &SqlitePool,
    member_id: &str,
) -> sqlx::Result<Option<Vec<EventCardView>>> {
    let Some(member) = member_repo::get_active_member_by_id(pool, member_id).await? else {
        return Ok(None);
    };

    let mut conn = pool.acquire().await?;
    let events = event_repo::list_events(&mut conn, &member.choir_id).await?;

    let mut cards = Vec::new();
    for event in events {
        let target = TargetSpec::from_stored(
            event.include_all_active,
            event.target_membership_types.as_deref(),
            event.target_voice_groups.as_deref(),
            event.target_voice_types.as_deref(),
        );
        if !targeting_service::is_member_eligible(&member, &target) {
            continue;
        }

        let rows = event_attendance_repo::list_for_event(&mut conn, &event.event_id).await?;
        let my_intended_status = rows
            .iter()
            .find(|r| r.member_id == member.member_id)
            .map(|r| r.intended_status.clone())
            .unwrap_or_else(|| "not_responded".to_string());
        let summary = attendance_summary_service::summarize(&rows, &event.attendance_mode);

        cards.push(EventCardView {
            event_id: event.event_id,
            title: event.title,
            scheduled_at: event.scheduled_at,
            attendance_mode: event.attendance_mode,
            my_intended_status,
            summary,
        });
    }
    Ok(Some(cards))
}
