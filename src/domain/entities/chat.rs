//! Chat list entities.

use chrono::{DateTime, Utc};

/// Opaque identifier for a chat, supplied by the navigation shell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChatId(String);

impl ChatId {
    /// Returns the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChatId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ChatId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Whether a chat is a one-to-one conversation or a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatKind {
    /// One-to-one conversation.
    #[default]
    Single,
    /// Group conversation with multiple members.
    Group,
}

/// One row of the chat list: a conversation with its latest activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSummary {
    id: ChatId,
    name: String,
    last_message: String,
    last_activity: DateTime<Utc>,
    kind: ChatKind,
    unread_count: u32,
}

impl ChatSummary {
    /// Creates a new chat summary.
    #[must_use]
    pub fn new(
        id: impl Into<ChatId>,
        name: impl Into<String>,
        last_message: impl Into<String>,
        last_activity: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            last_message: last_message.into(),
            last_activity,
            kind: ChatKind::Single,
            unread_count: 0,
        }
    }

    /// Marks the chat as a group conversation.
    #[must_use]
    pub const fn group(mut self) -> Self {
        self.kind = ChatKind::Group;
        self
    }

    /// Sets the unread message count.
    #[must_use]
    pub const fn with_unread(mut self, count: u32) -> Self {
        self.unread_count = count;
        self
    }

    /// Returns the chat id.
    #[must_use]
    pub const fn id(&self) -> &ChatId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the latest message preview.
    #[must_use]
    pub fn last_message(&self) -> &str {
        &self.last_message
    }

    /// Returns the time of the latest activity.
    #[must_use]
    pub const fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    /// Returns the chat kind.
    #[must_use]
    pub const fn kind(&self) -> ChatKind {
        self.kind
    }

    /// Returns true for group conversations.
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.kind == ChatKind::Group
    }

    /// Returns the unread message count.
    #[must_use]
    pub const fn unread_count(&self) -> u32 {
        self.unread_count
    }

    /// Returns true if unread messages are pending.
    #[must_use]
    pub const fn has_unread(&self) -> bool {
        self.unread_count > 0
    }

    /// Formats the latest activity time with a chrono format string.
    #[must_use]
    pub fn formatted_time(&self, format: &str) -> String {
        self.last_activity.format(format).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_builder_defaults() {
        let when = Utc.with_ymd_and_hms(2024, 5, 20, 14, 44, 0).unwrap();
        let chat = ChatSummary::new("1", "妈妈", "好的,去吧", when);

        assert_eq!(chat.id().as_str(), "1");
        assert_eq!(chat.kind(), ChatKind::Single);
        assert!(!chat.has_unread());
    }

    #[test]
    fn test_group_with_unread() {
        let when = Utc.with_ymd_and_hms(2024, 5, 20, 14, 44, 0).unwrap();
        let chat = ChatSummary::new("4", "疯子群", "哈哈哈哈哈", when)
            .group()
            .with_unread(20);

        assert!(chat.is_group());
        assert_eq!(chat.unread_count(), 20);
        assert!(chat.has_unread());
    }

    #[test]
    fn test_formatted_time() {
        let when = Utc.with_ymd_and_hms(2024, 5, 20, 14, 44, 0).unwrap();
        let chat = ChatSummary::new("1", "妈妈", "OK", when);

        assert_eq!(chat.formatted_time("%H:%M"), "14:44");
    }
}
