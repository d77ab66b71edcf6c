//! Shared fixtures: an in-memory database with the production schema and a
//! small standard choir.
#![allow(dead_code)]

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub const CHOIR_ID: &str = "choir-1";
pub const MT_MEMBER: &str = "mt-member";
pub const MT_BOARD: &str = "mt-board";

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE membership_types (
      membership_type_id TEXT PRIMARY KEY,
      choir_id TEXT NOT NULL,
      name TEXT NOT NULL,
      is_active_membership INTEGER NOT NULL DEFAULT 1,
      is_deleted INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE voice_groups (
      group_id TEXT PRIMARY KEY,
      choir_id TEXT NOT NULL,
      name TEXT NOT NULL,
      is_active INTEGER NOT NULL DEFAULT 1
    )
    "#,
    r#"
    CREATE TABLE voice_types (
      type_id TEXT PRIMARY KEY,
      choir_id TEXT NOT NULL,
      group_id TEXT NOT NULL,
      name TEXT NOT NULL,
      is_active INTEGER NOT NULL DEFAULT 1
    )
    "#,
    r#"
    CREATE TABLE members (
      member_id TEXT PRIMARY KEY,
      choir_id TEXT NOT NULL,
      name TEXT NOT NULL,
      membership_type_id TEXT NOT NULL,
      voice_group_id TEXT NOT NULL,
      voice_type_id TEXT,
      is_deleted INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE events (
      event_id TEXT PRIMARY KEY,
      choir_id TEXT NOT NULL,
      title TEXT NOT NULL,
      scheduled_at TEXT NOT NULL,
      attendance_mode TEXT NOT NULL DEFAULT 'opt_in',
      include_all_active INTEGER NOT NULL DEFAULT 0,
      target_membership_types TEXT,
      target_voice_groups TEXT,
      target_voice_types_selected TEXT,
      target_voice_types TEXT,
      created_by TEXT,
      is_deleted INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE event_attendance (
      attendance_id TEXT PRIMARY KEY,
      event_id TEXT NOT NULL,
      member_id TEXT NOT NULL,
      intended_status TEXT NOT NULL DEFAULT 'not_responded',
      intended_reason TEXT,
      actual_status TEXT,
      marked_by TEXT,
      marked_at TEXT,
      member_response_at TEXT,
      UNIQUE(event_id, member_id)
    )
    "#,
    r#"
    CREATE TABLE info_feed_posts (
      post_id TEXT PRIMARY KEY,
      choir_id TEXT NOT NULL,
      title TEXT NOT NULL,
      body TEXT NOT NULL,
      include_all_active INTEGER NOT NULL DEFAULT 0,
      target_membership_types TEXT,
      target_voice_groups TEXT,
      target_voice_types_selected TEXT,
      target_voice_types TEXT,
      published_at TEXT NOT NULL,
      is_deleted INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE chats (
      chat_id TEXT PRIMARY KEY,
      choir_id TEXT NOT NULL,
      name TEXT NOT NULL,
      voice_group_id TEXT,
      voice_type_id TEXT,
      membership_type_ids TEXT,
      is_deleted INTEGER NOT NULL DEFAULT 0
    )
    "#,
];

// One connection: every handle must see the same in-memory database.
pub async fn setup_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    for ddl in SCHEMA {
        sqlx::query(ddl).execute(&pool).await.expect("schema");
    }
    pool
}

pub async fn insert_membership_type(pool: &SqlitePool, id: &str, name: &str, is_active: i64) {
    sqlx::query(
        "INSERT INTO membership_types (membership_type_id, choir_id, name, is_active_membership)
         VALUES (?, ?, ?, ?)",
    )
    .bind(id)
    .bind(CHOIR_ID)
    .bind(name)
    .bind(is_active)
    .execute(pool)
    .await
    .expect("insert membership type");
}

pub async fn insert_voice_group(pool: &SqlitePool, id: &str, name: &str, is_active: i64) {
    sqlx::query("INSERT INTO voice_groups (group_id, choir_id, name, is_active) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(CHOIR_ID)
        .bind(name)
        .bind(is_active)
        .execute(pool)
        .await
        .expect("insert voice group");
}

pub async fn insert_voice_type(
    pool: &SqlitePool,
    id: &str,
    group_id: &str,
    name: &str,
    is_active: i64,
) {
    sqlx::query(
        "INSERT INTO voice_types (type_id, choir_id, group_id, name, is_active)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(CHOIR_ID)
    .bind(group_id)
    .bind(name)
    .bind(is_active)
    .execute(pool)
    .await
    .expect("insert voice type");
}

pub async fn insert_member(
    pool: &SqlitePool,
    id: &str,
    name: &str,
    membership_type_id: &str,
    voice_group_id: &str,
    voice_type_id: Option<&str>,
) {
    sqlx::query(
        "INSERT INTO members
           (member_id, choir_id, name, membership_type_id, voice_group_id, voice_type_id)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(CHOIR_ID)
    .bind(name)
    .bind(membership_type_id)
    .bind(voice_group_id)
    .bind(voice_type_id)
    .execute(pool)
    .await
    .expect("insert member");
}

pub async fn insert_chat(
    pool: &SqlitePool,
    id: &str,
    name: &str,
    voice_group_id: Option<&str>,
    voice_type_id: Option<&str>,
    membership_type_ids: Option<&str>,
) {
    sqlx::query(
        "INSERT INTO chats (chat_id, choir_id, name, voice_group_id, voice_type_id, membership_type_ids)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(CHOIR_ID)
    .bind(name)
    .bind(voice_group_id)
    .bind(voice_type_id)
    .bind(membership_type_ids)
    .execute(pool)
    .await
    .expect("insert chat");
}

/// The reference choir: Soprano (g1, with types sop1/sop2), Alto (g2),
/// Tenor (g3), Bass (g4). Members: A sits on Soprano without a specific
/// type, B is a 1st Soprano, C sits on Tenor.
pub async fn seed_standard_choir(pool: &SqlitePool) {
    insert_membership_type(pool, MT_MEMBER, "Lid", 1).await;
    insert_membership_type(pool, MT_BOARD, "Bestuur", 1).await;

    insert_voice_group(pool, "g1", "Sopraan", 1).await;
    insert_voice_group(pool, "g2", "Alt", 1).await;
    insert_voice_group(pool, "g3", "Tenor", 1).await;
    insert_voice_group(pool, "g4", "Bas", 1).await;

    insert_voice_type(pool, "sop1", "g1", "1e Sopraan", 1).await;
    insert_voice_type(pool, "sop2", "g1", "2e Sopraan", 1).await;

    insert_member(pool, "member-a", "Anna", MT_MEMBER, "g1", None).await;
    insert_member(pool, "member-b", "Bea", MT_MEMBER, "g1", Some("sop1")).await;
    insert_member(pool, "member-c", "Cees", MT_MEMBER, "g3", None).await;
}

pub fn strings(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}
