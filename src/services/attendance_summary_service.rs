use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::{event_attendance_repo, event_repo};
use crate::models::EventAttendanceRow;

#[derive(Debug, Default, Serialize)]
pub struct AttendanceSummary {
    pub attending: i64,
    pub not_attending: i64,
    pub tentative: i64,
    pub not_responded: i64,
    pub effective_attending: i64,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
}

/// Counts attendance rows by intended and actual status. The two dimensions
/// are independent: an actual status can be recorded whatever the member
/// intended.
///
/// For opt-out events silence counts as "will attend", so not-responded rows
/// are folded into `effective_attending`; opt-in events only count explicit
/// responses.
pub fn summarize(rows: &[EventAttendanceRow], attendance_mode: &str) -> AttendanceSummary {
    let mut summary = AttendanceSummary::default();

    for row in rows {
        match row.intended_status.as_str() {
            "attending" => summary.attending += 1,
            "not_attending" => summary.not_attending += 1,
            "tentative" => summary.tentative += 1,
            "not_responded" => summary.not_responded += 1,
            _ => {}
        }
        match row.actual_status.as_deref() {
            Some("present") => summary.present += 1,
            Some("absent") => summary.absent += 1,
            Some("late") => summary.late += 1,
            _ => {}
        }
    }

    summary.effective_attending = if attendance_mode == "opt_out" {
        summary.attending + summary.not_responded
    } else {
        summary.attending
    };
    summary
}

#[derive(Serialize)]
pub struct EventAttendanceSummaryView {
    pub event_id: String,
    pub title: String,
    pub scheduled_at: String,
    pub attendance_mode: String,
    pub summary: AttendanceSummary,
}

pub async fn load_event_attendance_summary(
    pool: &SqlitePool,
    choir_id: &str,
    event_id: &str,
) -> sqlx::Result<Option<EventAttendanceSummaryView>> {
    let mut conn = pool.acquire().await?;
    let Some(event) = event_repo::get_event_by_id(&mut conn, event_id).await? else {
        return Ok(None);
    };
    if event.choir_id != choir_id {
        return Ok(None);
    }
    let rows = event_attendance_repo::list_for_event(&mut conn, event_id).await?;
    let summary = summarize(&rows, &event.attendance_mode);
    Ok(Some(EventAttendanceSummaryView {
        event_id: event.event_id,
        title: event.title,
        scheduled_at: event.scheduled_at,
        attendance_mode: event.attendance_mode,
        summary,
    }))
}
