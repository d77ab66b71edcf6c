use sqlx::{SqliteConnection, SqlitePool};

use crate::models::MemberRow;

// Targeting only ever considers members whose membership type grants system
// access; that precondition is pushed into the query instead of re-checked
// per member in the predicate.
pub const SQL_LIST_ACTIVE_MEMBERS: &str = r#"
SELECT
  m.member_id,
  m.choir_id,
  m.name,
  m.membership_type_id,
  m.voice_group_id,
  m.voice_type_id,
  m.is_deleted
FROM members m
JOIN membership_types mt
  ON mt.membership_type_id = m.membership_type_id
WHERE m.choir_id = ?1
  AND m.is_deleted = 0
  AND mt.is_deleted = 0
  AND mt.is_active_membership = 1
ORDER BY m.name ASC
"#;

pub async fn list_active_members(
    conn: &mut SqliteConnection,
    choir_id: &str,
) -> sqlx::Result<Vec<MemberRow>> {
    sqlx::query_as::<_, MemberRow>(SQL_LIST_ACTIVE_MEMBERS)
        .bind(choir_id)
        .fetch_all(conn)
        .await
}

pub const SQL_GET_ACTIVE_MEMBER_BY_ID: &str = r#"
SELECT
  m.member_id,
  m.choir_id,
  m.name,
  m.membership_type_id,
  m.voice_group_id,
  m.voice_type_id,
  m.is_deleted
FROM members m
JOIN membership_types mt
  ON mt.membership_type_id = m.membership_type_id
WHERE m.member_id = ?1
  AND m.is_deleted = 0
  AND mt.is_deleted = 0
  AND mt.is_active_membership = 1
LIMIT 1
"#;

pub async fn get_active_member_by_id(
    pool: &SqlitePool,
    member_id: &str,
) -> sqlx::Result<Option<MemberRow>> {
    sqlx::query_as::<_, MemberRow>(SQL_GET_ACTIVE_MEMBER_BY_ID)
        .bind(member_id)
        .fetch_optional(pool)
        .await
}
