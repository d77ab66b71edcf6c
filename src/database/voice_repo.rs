use sqlx::SqliteConnection;

use crate::models::{VoiceGroupRow, VoiceTypeRow};

// Group ids arrive as a JSON array so a single prepared statement covers any
// selection size (same trick the rest of the codebase uses for id lists).
pub const SQL_LIST_ACTIVE_TYPES_IN_GROUPS: &str = r#"
SELECT
  type_id,
  choir_id,
  group_id,
  name,
  is_active
FROM voice_types
WHERE choir_id = ?1
  AND is_active = 1
  AND group_id IN (SELECT value FROM json_each(?2))
ORDER BY name ASC
"#;

pub async fn list_active_types_in_groups(
    conn: &mut SqliteConnection,
    choir_id: &str,
    group_ids_json: &str,
) -> sqlx::Result<Vec<VoiceTypeRow>> {
    sqlx::query_as::<_, VoiceTypeRow>(SQL_LIST_ACTIVE_TYPES_IN_GROUPS)
        .bind(choir_id)
        .bind(group_ids_json)
        .fetch_all(conn)
        .await
}

pub const SQL_LIST_ACTIVE_TYPES: &str = r#"
SELECT
  type_id,
  choir_id,
  group_id,
  name,
  is_active
FROM voice_types
WHERE choir_id = ?1
  AND is_active = 1
ORDER BY name ASC
"#;

pub async fn list_active_types(
    conn: &mut SqliteConnection,
    choir_id: &str,
) -> sqlx::Result<Vec<VoiceTypeRow>> {
    sqlx::query_as::<_, VoiceTypeRow>(SQL_LIST_ACTIVE_TYPES)
        .bind(choir_id)
        .fetch_all(conn)
        .await
}

pub const SQL_LIST_ACTIVE_GROUPS: &str = r#"
SELECT
  group_id,
  choir_id,
  name,
  is_active
FROM voice_groups
WHERE choir_id = ?1
  AND is_active = 1
ORDER BY name ASC
"#;

pub async fn list_active_groups(
    conn: &mut SqliteConnection,
    choir_id: &str,
) -> sqlx::Result<Vec<VoiceGroupRow>> {
    sqlx::query_as::<_, VoiceGroupRow>(SQL_LIST_ACTIVE_GROUPS)
        .bind(choir_id)
        .fetch_all(conn)
        .await
}
