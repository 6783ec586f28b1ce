//! Application services.

/// Fuzzy search over chats and contacts.
pub mod search_service;
/// Conversation timeline controller.
pub mod timeline_service;

pub use search_service::SearchService;
pub use timeline_service::{ComposerAffordance, ConversationTimeline, TimelineEvent};
