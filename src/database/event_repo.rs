use sqlx::SqliteConnection;

use crate::models::EventRow;

pub const SQL_GET_EVENT_BY_ID: &str = r#"
SELECT
  event_id,
  choir_id,
  title,
  scheduled_at,
  attendance_mode,
  include_all_active,
  target_membership_types,
  target_voice_groups,
  target_voice_types_selected,
  target_voice_types,
  created_by,
  is_deleted
FROM events
WHERE is_deleted = 0
  AND event_id = ?1
LIMIT 1
"#;

pub async fn get_event_by_id(
    conn: &mut SqliteConnection,
    event_id: &str,
) -> sqlx::Result<Option<EventRow>> {
    sqlx::query_as::<_, EventRow>(SQL_GET_EVENT_BY_ID)
        .bind(event_id)
        .fetch_optional(conn)
        .await
}

pub const SQL_LIST_EVENTS: &str = r#"
SELECT
  event_id,
  choir_id,
  title,
  scheduled_at,
  attendance_mode,
  include_all_active,
  target_membership_types,
  target_voice_groups,
  target_voice_types_selected,
  target_voice_types,
  created_by,
  is_deleted
FROM events
WHERE is_deleted = 0
  AND choir_id = ?1
ORDER BY datetime(scheduled_at) ASC
"#;

pub async fn list_events(
    conn: &mut SqliteConnection,
    choir_id: &str,
) -> sqlx::Result<Vec<EventRow>> {
    sqlx::query_as::<_, EventRow>(SQL_LIST_EVENTS)
        .bind(choir_id)
        .fetch_all(conn)
        .await
}

pub const SQL_INSERT_EVENT: &str = r#"
INSERT INTO events (
  event_id,
  choir_id,
  title,
  scheduled_at,
  attendance_mode,
  include_all_active,
  target_membership_types,
  target_voice_groups,
  target_voice_types_selected,
  target_voice_types,
  created_by,
  is_deleted
) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0)
"#;

pub struct NewEvent<'a> {
    pub event_id: &'a str,
    pub choir_id: &'a str,
    pub title: &'a str,
    pub scheduled_at: &'a str,
    pub attendance_mode: &'a str,
    pub include_all_active: i64,
    pub target_membership_types: &'a str,
    pub target_voice_groups: &'a str,
    pub target_voice_types_selected: &'a str,
    pub target_voice_types: &'a str,
    pub created_by: &'a str,
}

pub async fn insert_event(conn: &mut SqliteConnection, event: NewEvent<'_>) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_EVENT)
        .bind(event.event_id)
        .bind(event.choir_id)
        .bind(event.title)
        .bind(event.scheduled_at)
        .bind(event.attendance_mode)
        .bind(event.include_all_active)
        .bind(event.target_membership_types)
        .bind(event.target_voice_groups)
        .bind(event.target_voice_types_selected)
        .bind(event.target_voice_types)
        .bind(event.created_by)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}

pub const SQL_UPDATE_EVENT_TARGETING: &str = r#"
UPDATE events
SET include_all_active = ?2,
    target_membership_types = ?3,
    target_voice_groups = ?4,
    target_voice_types_selected = ?5,
    target_voice_types = ?6
WHERE is_deleted = 0
  AND event_id = ?1
"#;

pub async fn update_event_targeting(
    conn: &mut SqliteConnection,
    event_id: &str,
    include_all_active: i64,
    target_membership_types: &str,
    target_voice_groups: &str,
    target_voice_types_selected: &str,
    target_voice_types: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_EVENT_TARGETING)
        .bind(event_id)
        .bind(include_all_active)
        .bind(target_membership_types)
        .bind(target_voice_groups)
        .bind(target_voice_types_selected)
        .bind(target_voice_types)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}

pub const SQL_UPDATE_EVENT_VOICE_CLOSURE: &str = r#"
UPDATE events
SET target_voice_types = ?2
WHERE is_deleted = 0
  AND event_id = ?1
"#;

pub async fn update_event_voice_closure(
    conn: &mut SqliteConnection,
    event_id: &str,
    target_voice_types: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_EVENT_VOICE_CLOSURE)
        .bind(event_id)
        .bind(target_voice_types)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}
