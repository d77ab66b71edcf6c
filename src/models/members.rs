use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct MemberRow {
    pub member_id: String,
    pub choir_id: String,
    pub name: String,
    pub membership_type_id: String,
    pub voice_group_id: String,
    pub voice_type_id: Option<String>,
    pub is_deleted: i64,
}
