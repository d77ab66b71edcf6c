use sqlx::SqliteConnection;

use crate::models::ChatRow;

pub const SQL_LIST_CHATS: &str = r#"
SELECT
  chat_id,
  choir_id,
  name,
  voice_group_id,
  voice_type_id,
  membership_type_ids,
  is_deleted
FROM chats
WHERE is_deleted = 0
  AND choir_id = ?1
ORDER BY name ASC
"#;

pub async fn list_chats(
    conn: &mut SqliteConnection,
    choir_id: &str,
) -> sqlx::Result<Vec<ChatRow>> {
    sqlx::query_as::<_, ChatRow>(SQL_LIST_CHATS)
        .bind(choir_id)
        .fetch_all(conn)
        .await
}

pub const SQL_GET_CHAT_BY_ID: &str = r#"
SELECT
  chat_id,
  choir_id,
  name,
  voice_group_id,
  voice_type_id,
  membership_type_ids,
  is_deleted
FROM chats
WHERE is_deleted = 0
  AND chat_id = ?1
LIMIT 1
"#;

pub async fn get_chat_by_id(
    conn: &mut SqliteConnection,
    chat_id: &str,
) -> sqlx::Result<Option<ChatRow>> {
    sqlx::query_as::<_, ChatRow>(SQL_GET_CHAT_BY_ID)
        .bind(chat_id)
        .fetch_optional(conn)
        .await
}
