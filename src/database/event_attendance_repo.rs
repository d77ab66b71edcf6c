use sqlx::{SqliteConnection, SqlitePool};

use crate::models::EventAttendanceRow;

pub const SQL_LIST_FOR_EVENT: &str = r#"
SELECT
  attendance_id,
  event_id,
  member_id,
  intended_status,
  intended_reason,
  actual_status,
  marked_by,
  marked_at,
  member_response_at
FROM event_attendance
WHERE event_id = ?1
"#;

pub async fn list_for_event(
    conn: &mut SqliteConnection,
    event_id: &str,
) -> sqlx::Result<Vec<EventAttendanceRow>> {
    sqlx::query_as::<_, EventAttendanceRow>(SQL_LIST_FOR_EVENT)
        .bind(event_id)
        .fetch_all(conn)
        .await
}

pub const SQL_INSERT_PLACEHOLDER: &str = r#"
INSERT INTO event_attendance (
  attendance_id,
  event_id,
  member_id,
  intended_status
) VALUES (?, ?, ?, 'not_responded')
"#;

pub async fn insert_placeholder(
    conn: &mut SqliteConnection,
    attendance_id: &str,
    event_id: &str,
    member_id: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_PLACEHOLDER)
        .bind(attendance_id)
        .bind(event_id)
        .bind(member_id)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}

// Roster rows keep referencing members that have since left the choir; the
// LEFT JOIN keeps those historical rows visible.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AttendanceRosterRow {
    pub member_id: String,
    pub member_name: Option<String>,
    pub intended_status: String,
    pub intended_reason: Option<String>,
    pub actual_status: Option<String>,
    pub marked_by: Option<String>,
    pub marked_at: Option<String>,
    pub member_response_at: Option<String>,
}

pub const SQL_LIST_ROSTER_FOR_EVENT: &str = r#"
SELECT
  ea.member_id,
  m.name AS member_name,
  ea.intended_status,
  ea.intended_reason,
  ea.actual_status,
  ea.marked_by,
  ea.marked_at,
  ea.member_response_at
FROM event_attendance ea
LEFT JOIN members m
  ON m.member_id = ea.member_id
WHERE ea.event_id = ?1
ORDER BY m.name ASC
"#;

pub async fn list_roster_for_event(
    conn: &mut SqliteConnection,
    event_id: &str,
) -> sqlx::Result<Vec<AttendanceRosterRow>> {
    sqlx::query_as::<_, AttendanceRosterRow>(SQL_LIST_ROSTER_FOR_EVENT)
        .bind(event_id)
        .fetch_all(conn)
        .await
}

pub const SQL_UPDATE_INTENDED_STATUS: &str = r#"
UPDATE event_attendance
SET intended_status = ?3,
    intended_reason = ?4,
    member_response_at = datetime('now')
WHERE event_id = ?1
  AND member_id = ?2
"#;

pub async fn update_intended_status(
    pool: &SqlitePool,
    event_id: &str,
    member_id: &str,
    intended_status: &str,
    intended_reason: Option<&str>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_INTENDED_STATUS)
        .bind(event_id)
        .bind(member_id)
        .bind(intended_status)
        .bind(intended_reason)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub const SQL_UPDATE_ACTUAL_STATUS: &str = r#"
UPDATE event_attendance
SET actual_status = ?3,
    marked_by = ?4,
    marked_at = datetime('now')
WHERE event_id = ?1
  AND member_id = ?2
"#;

pub async fn update_actual_status(
    pool: &SqlitePool,
    event_id: &str,
    member_id: &str,
    actual_status: &str,
    marked_by: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_ACTUAL_STATUS)
        .bind(event_id)
        .bind(member_id)
        .bind(actual_status)
        .bind(marked_by)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
