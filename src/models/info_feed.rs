use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct InfoFeedPostRow {
    pub post_id: String,
    pub choir_id: String,
    pub title: String,
    pub body: String,
    pub include_all_active: i64,
    pub target_membership_types: Option<String>,
    pub target_voice_groups: Option<String>,
    pub target_voice_types_selected: Option<String>,
    pub target_voice_types: Option<String>,
    pub published_at: String,
    pub is_deleted: i64,
}
