//! Directory port definition.

use async_trait::async_trait;

use crate::domain::entities::{ChatEntry, ChatId, ChatSummary, Contact};

/// Port supplying the chat list, the contact directory and conversation
/// seed histories. The shipped implementation is an in-memory store; a
/// networked backend would attach here without touching the timeline.
#[async_trait]
pub trait DirectoryPort: Send + Sync {
    /// Returns all chats, most recently active first.
    async fn chats(&self) -> Vec<ChatSummary>;

    /// Returns the contact directory.
    async fn contacts(&self) -> Vec<Contact>;

    /// Returns the prior history for a conversation, newest-first.
    ///
    /// Unknown chat ids yield an empty history.
    async fn conversation_seed(&self, chat: &ChatId) -> Vec<ChatEntry>;
}
