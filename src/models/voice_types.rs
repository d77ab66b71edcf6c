use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct VoiceTypeRow {
    pub type_id: String,
    pub choir_id: String,
    pub group_id: String,
    pub name: String,
    pub is_active: i64,
}
