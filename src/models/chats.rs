use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ChatRow {
    pub chat_id: String,
    pub choir_id: String,
    pub name: String,
    // voice_type_id set: chat for that specific type only.
    // voice_group_id set, voice_type_id null: chat for the whole group.
    pub voice_group_id: Option<String>,
    pub voice_type_id: Option<String>,
    pub membership_type_ids: Option<String>,
    pub is_deleted: i64,
}
