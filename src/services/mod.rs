pub mod attendance_service;
pub mod attendance_summary_service;
pub mod chat_service;
pub mod event_service;
pub mod feed_service;
pub mod targeting_service;
