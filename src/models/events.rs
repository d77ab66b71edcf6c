use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub event_id: String,
    pub choir_id: String,
    pub title: String,
    pub scheduled_at: String,
    pub attendance_mode: String, // opt_in|opt_out
    pub include_all_active: i64,
    pub target_membership_types: Option<String>,
    pub target_voice_groups: Option<String>,
    // Raw selection as chosen in the event form.
    pub target_voice_types_selected: Option<String>,
    // Materialized closure: selected types plus all active child types of the
    // selected groups, computed at write time.
    pub target_voice_types: Option<String>,
    pub created_by: Option<String>,
    pub is_deleted: i64,
}
