pub mod chat_repo;
pub mod event_attendance_repo;
pub mod event_repo;
pub mod info_feed_repo;
pub mod member_repo;
pub mod voice_repo;
