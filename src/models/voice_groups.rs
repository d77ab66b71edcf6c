use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct VoiceGroupRow {
    pub group_id: String,
    pub choir_id: String,
    pub name: String,
    pub is_active: i64,
}
