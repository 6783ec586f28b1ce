//! Conversation timeline entries.

/// Unique identifier for a timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryId(String);

impl EntryId {
    /// Returns the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A chat message within a conversation timeline.
///
/// `text` is never empty or whitespace-only: the composer trims and rejects
/// blank drafts before an entry is constructed, and seed data is trusted to
/// uphold the same invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    id: EntryId,
    text: String,
    outgoing: bool,
    author_name: String,
}

impl MessageEntry {
    /// Creates a new message entry.
    #[must_use]
    pub fn new(
        id: impl Into<EntryId>,
        text: impl Into<String>,
        outgoing: bool,
        author_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            outgoing,
            author_name: author_name.into(),
        }
    }

    /// Returns the entry id.
    #[must_use]
    pub const fn id(&self) -> &EntryId {
        &self.id
    }

    /// Returns the message text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true if the local user authored this message.
    #[must_use]
    pub const fn is_outgoing(&self) -> bool {
        self.outgoing
    }

    /// Returns the author display name.
    #[must_use]
    pub fn author_name(&self) -> &str {
        &self.author_name
    }
}

/// A non-interactive timestamp separator between messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampDivider {
    id: EntryId,
    label: String,
}

impl TimestampDivider {
    /// Creates a new divider with a display label.
    #[must_use]
    pub fn new(id: impl Into<EntryId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Returns the entry id.
    #[must_use]
    pub const fn id(&self) -> &EntryId {
        &self.id
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// One item in a conversation timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEntry {
    /// A chat message, incoming or outgoing.
    Message(MessageEntry),
    /// A timestamp separator.
    Divider(TimestampDivider),
}

impl ChatEntry {
    /// Returns the entry id regardless of variant.
    #[must_use]
    pub const fn id(&self) -> &EntryId {
        match self {
            Self::Message(message) => message.id(),
            Self::Divider(divider) => divider.id(),
        }
    }

    /// Returns the message payload, if this entry is a message.
    #[must_use]
    pub const fn as_message(&self) -> Option<&MessageEntry> {
        match self {
            Self::Message(message) => Some(message),
            Self::Divider(_) => None,
        }
    }

    /// Returns true if this entry is a timestamp divider.
    #[must_use]
    pub const fn is_divider(&self) -> bool {
        matches!(self, Self::Divider(_))
    }
}

impl From<MessageEntry> for ChatEntry {
    fn from(message: MessageEntry) -> Self {
        Self::Message(message)
    }
}

impl From<TimestampDivider> for ChatEntry {
    fn from(divider: TimestampDivider) -> Self {
        Self::Divider(divider)
    }
}
