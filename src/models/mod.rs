pub mod chats;
pub mod event_attendance;
pub mod events;
pub mod info_feed;
pub mod members;
pub mod voice_groups;
pub mod voice_types;

pub use chats::ChatRow;
pub use event_attendance::EventAttendanceRow;
pub use events::EventRow;
pub use info_feed::InfoFeedPostRow;
pub use members::MemberRow;
pub use voice_groups::VoiceGroupRow;
pub use voice_types::VoiceTypeRow;
