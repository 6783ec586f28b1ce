//! In-memory directory standing in for a chat server.

mod accounts;
/// Seed fixtures.
pub mod seed;

pub use accounts::InMemoryAccounts;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::entities::{ChatEntry, ChatId, ChatSummary, Contact};
use crate::domain::ports::DirectoryPort;

/// Directory backed by seed fixtures. Everything is cloned out; the
/// fixtures themselves never change, so open conversations stay isolated
/// from one another.
pub struct InMemoryDirectory {
    chats: Vec<ChatSummary>,
    contacts: Vec<Contact>,
    conversations: HashMap<ChatId, Vec<ChatEntry>>,
}

impl InMemoryDirectory {
    /// Creates the directory from the built-in seed fixtures.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chats: seed::chats(),
            contacts: seed::contacts(),
            conversations: seed::conversations(),
        }
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectoryPort for InMemoryDirectory {
    async fn chats(&self) -> Vec<ChatSummary> {
        self.chats.clone()
    }

    async fn contacts(&self) -> Vec<Contact> {
        self.contacts.clone()
    }

    async fn conversation_seed(&self, chat: &ChatId) -> Vec<ChatEntry> {
        self.conversations.get(chat).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_chat_seed() {
        let directory = InMemoryDirectory::new();

        let seed = directory.conversation_seed(&ChatId::from("1")).await;

        assert_eq!(seed.len(), 4);
        assert_eq!(seed[0].id().as_str(), "4");
    }

    #[tokio::test]
    async fn test_unknown_chat_yields_empty_history() {
        let directory = InMemoryDirectory::new();

        let seed = directory.conversation_seed(&ChatId::from("no-such-chat")).await;

        assert!(seed.is_empty());
    }

    #[tokio::test]
    async fn test_seed_is_cloned_per_call() {
        let directory = InMemoryDirectory::new();
        let chat = ChatId::from("1");

        let first = directory.conversation_seed(&chat).await;
        let second = directory.conversation_seed(&chat).await;

        assert_eq!(first, second);
    }
}
