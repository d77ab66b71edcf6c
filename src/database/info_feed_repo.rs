use sqlx::SqliteConnection;

use crate::models::InfoFeedPostRow;

pub const SQL_LIST_POSTS: &str = r#"
SELECT
  post_id,
  choir_id,
  title,
  body,
  include_all_active,
  target_membership_types,
  target_voice_groups,
  target_voice_types_selected,
  target_voice_types,
  published_at,
  is_deleted
FROM info_feed_posts
WHERE is_deleted = 0
  AND choir_id = ?1
ORDER BY datetime(published_at) DESC
"#;

pub async fn list_posts(
    conn: &mut SqliteConnection,
    choir_id: &str,
) -> sqlx::Result<Vec<InfoFeedPostRow>> {
    sqlx::query_as::<_, InfoFeedPostRow>(SQL_LIST_POSTS)
        .bind(choir_id)
        .fetch_all(conn)
        .await
}

pub const SQL_INSERT_POST: &str = r#"
INSERT INTO info_feed_posts (
  post_id,
  choir_id,
  title,
  body,
  include_all_active,
  target_membership_types,
  target_voice_groups,
  target_voice_types_selected,
  target_voice_types,
  published_at,
  is_deleted
) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, datetime('now'), 0)
"#;

pub struct NewInfoFeedPost<'a> {
    pub post_id: &'a str,
    pub choir_id: &'a str,
    pub title: &'a str,
    pub body: &'a str,
    pub include_all_active: i64,
    pub target_membership_types: &'a str,
    pub target_voice_groups: &'a str,
    pub target_voice_types_selected: &'a str,
    pub target_voice_types: &'a str,
}

pub async fn insert_post(
    conn: &mut SqliteConnection,
    post: NewInfoFeedPost<'_>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_POST)
        .bind(post.post_id)
        .bind(post.choir_id)
        .bind(post.title)
        .bind(post.body)
        .bind(post.include_all_active)
        .bind(post.target_membership_types)
        .bind(post.target_voice_groups)
        .bind(post.target_voice_types_selected)
        .bind(post.target_voice_types)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}

pub const SQL_UPDATE_POST_VOICE_CLOSURE: &str = r#"
UPDATE info_feed_posts
SET target_voice_types = ?2
WHERE is_deleted = 0
  AND post_id = ?1
"#;

pub async fn update_post_voice_closure(
    conn: &mut SqliteConnection,
    post_id: &str,
    target_voice_types: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_POST_VOICE_CLOSURE)
        .bind(post_id)
        .bind(target_voice_types)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}
