use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct EventAttendanceRow {
    pub attendance_id: String,
    pub event_id: String,
    pub member_id: String,
    pub intended_status: String, // attending|not_attending|tentative|not_responded
    pub intended_reason: Option<String>,
    pub actual_status: Option<String>, // present|absent|late
    pub marked_by: Option<String>,
    pub marked_at: Option<String>,
    pub member_response_at: Option<String>,
}
