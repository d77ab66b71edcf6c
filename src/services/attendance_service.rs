use std::collections::HashSet;

use serde::Serialize;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::database::{event_attendance_repo, event_repo};
use crate::services::targeting_service::{self, TargetSpec};

/// Brings the attendance placeholders of an event in line with its currently
/// eligible member set. Additive only: members that stopped being eligible
/// keep their row as historical record. Running it twice without a targeting
/// change inserts nothing the second time.
///
/// Returns `None` when the event does not exist, otherwise the number of
/// rows created. Callers that pair this with a targeting update must do so
/// on the same transaction connection.
pub async fn reconcile_event_attendance(
    conn: &mut SqliteConnection,
    event_id: &str,
) -> sqlx::Result<Option<u64>> {
    let Some(event) = event_repo::get_event_by_id(conn, event_id).await? else {
        return Ok(None);
    };

    let target = TargetSpec::from_stored(
        event.include_all_active,
        event.target_membership_types.as_deref(),
        event.target_voice_groups.as_deref(),
        event.target_voice_types.as_deref(),
    );
    let eligible = targeting_service::get_eligible_members(conn, &event.choir_id, &target).await?;

    let existing = event_attendance_repo::list_for_event(conn, event_id).await?;
    let existing_ids: HashSet<&str> = existing.iter().map(|r| r.member_id.as_str()).collect();

    let mut created: u64 = 0;
    for member in &eligible {
        if existing_ids.contains(member.member_id.as_str()) {
            continue;
        }
        let attendance_id = Uuid::new_v4().to_string();
        event_attendance_repo::insert_placeholder(conn, &attendance_id, event_id, &member.member_id)
            .await?;
        created += 1;
    }

    if created > 0 {
        info!(
            "Reconciled attendance for event {}: {} placeholders created",
            event_id, created
        );
    }
    Ok(Some(created))
}

/// Member RSVP. Only members that already hold a placeholder row (i.e. are
/// addressed by the event) can respond; returns false otherwise.
///
/// An earlier recorded actual status does not lock the intended response;
/// intent and record are independent dimensions.
pub async fn set_intended_status(
    pool: &SqlitePool,
    choir_id: &str,
    event_id: &str,
    member_id: &str,
    intended_status: &str,
    intended_reason: Option<&str>,
) -> sqlx::Result<bool> {
    if !event_in_choir(pool, choir_id, event_id).await? {
        return Ok(false);
    }
    let updated = event_attendance_repo::update_intended_status(
        pool,
        event_id,
        member_id,
        intended_status,
        intended_reason,
    )
    .await?;
    Ok(updated > 0)
}

/// Records what actually happened, independent of the member's intended
/// status, with an audit stamp of who marked it and when.
pub async fn record_actual_status(
    pool: &SqlitePool,
    choir_id: &str,
    event_id: &str,
    member_id: &str,
    actual_status: &str,
    marked_by: &str,
) -> sqlx::Result<bool> {
    if !event_in_choir(pool, choir_id, event_id).await? {
        return Ok(false);
    }
    let updated = event_attendance_repo::update_actual_status(
        pool,
        event_id,
        member_id,
        actual_status,
        marked_by,
    )
    .await?;
    Ok(updated > 0)
}

#[derive(Serialize)]
pub struct AttendanceRosterEntryView {
    pub member_id: String,
    pub member_name: String,
    pub intended_status: String,
    pub intended_reason: Option<String>,
    pub actual_status: Option<String>,
    pub marked_by: Option<String>,
    pub marked_at: Option<String>,
    pub member_response_at: Option<String>,
}

pub async fn load_event_roster(
    pool: &SqlitePool,
    choir_id: &str,
    event_id: &str,
) -> sqlx::Result<Option<Vec<AttendanceRosterEntryView>>> {
    if !event_in_choir(pool, choir_id, event_id).await? {
        return Ok(None);
    }
    let mut conn = pool.acquire().await?;
    let rows = event_attendance_repo::list_roster_for_event(&mut conn, event_id).await?;
    Ok(Some(
        rows.into_iter()
            .map(|r| AttendanceRosterEntryView {
                member_id: r.member_id,
                member_name: r.member_name.unwrap_or_else(|| "Onbekend".to_string()),
                intended_status: r.intended_status,
                intended_reason: r.intended_reason,
                actual_status: r.actual_status,
                marked_by: r.marked_by,
                marked_at: r.marked_at,
                member_response_at: r.member_response_at,
            })
            .collect(),
    ))
}

async fn event_in_choir(pool: &SqlitePool, choir_id: &str, event_id: &str) -> sqlx::Result<bool> {
    let mut conn = pool.acquire().await?;
    let Some(event) = event_repo::get_event_by_id(&mut conn, event_id).await? else {
        return Ok(false);
    };
    Ok(event.choir_id == choir_id)
}
