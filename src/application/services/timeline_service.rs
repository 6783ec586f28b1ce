//! Conversation timeline controller.
//!
//! Owns the ordered entry list of one open conversation and mediates the
//! compose-to-send transition. The list is kept newest-first: index 0 is
//! always the most recent entry, the order a bottom-anchored chat view
//! displays without re-sorting.

use crate::domain::entities::{ChatEntry, EntryId, MessageEntry};

/// The single control the composer bar exposes next to the text field.
///
/// Strict either/or: a blank draft offers the action panel, a usable
/// draft offers send, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerAffordance {
    /// No usable draft; the affordance opens the attachment/action panel.
    ActionPanel,
    /// A usable draft is present; the affordance sends it.
    Send,
}

/// Change notification drained by the presentation shell after each input.
///
/// Payloads are intentionally absent: the shell re-reads [`ConversationTimeline::entries`]
/// and [`ConversationTimeline::draft`] when it handles the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineEvent {
    /// The entry list changed: fired by `initialize` and every successful
    /// `send`.
    EntriesChanged,
    /// The draft text changed: fired by every `update_draft`.
    DraftChanged,
}

/// In-memory timeline and composer state for one open conversation.
///
/// Lives exactly as long as the conversation screen; nothing is persisted
/// on drop. Entry ids are unique for the lifetime of the instance.
pub struct ConversationTimeline {
    entries: Vec<ChatEntry>,
    draft: String,
    author_name: String,
    next_local_id: u64,
    events: Vec<TimelineEvent>,
}

impl ConversationTimeline {
    /// Creates an empty timeline. Outgoing messages will carry
    /// `author_name` as their author.
    #[must_use]
    pub fn new(author_name: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            draft: String::new(),
            author_name: author_name.into(),
            next_local_id: 0,
            events: Vec::new(),
        }
    }

    /// Replaces the timeline with a seed history, newest-first.
    ///
    /// Seed data is trusted: ids are assumed unique and message texts
    /// non-blank.
    pub fn initialize(&mut self, seed: Vec<ChatEntry>) {
        self.entries = seed;
        self.events.push(TimelineEvent::EntriesChanged);
    }

    /// Returns the entries, newest-first.
    #[must_use]
    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    /// Returns the entry count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the timeline has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the pending draft text.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replaces the draft with the composer's current text.
    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        self.events.push(TimelineEvent::DraftChanged);
    }

    /// Returns the control the composer should expose for the current
    /// draft.
    #[must_use]
    pub fn affordance(&self) -> ComposerAffordance {
        if self.draft.trim().is_empty() {
            ComposerAffordance::ActionPanel
        } else {
            ComposerAffordance::Send
        }
    }

    /// Sends the draft as an outgoing message.
    ///
    /// A blank (empty or whitespace-only) draft is declined silently: no
    /// entry is created, the draft is left untouched, and `None` is
    /// returned. On success the new message sits at index 0, the draft is
    /// cleared, and the fresh entry id is returned.
    pub fn send(&mut self) -> Option<EntryId> {
        let text = self.draft.trim().to_string();
        if text.is_empty() {
            return None;
        }

        let id = self.allocate_id();
        let message = MessageEntry::new(id.clone(), text.as_str(), true, self.author_name.as_str());
        self.entries.insert(0, message.into());
        self.draft.clear();
        self.events.push(TimelineEvent::EntriesChanged);
        Some(id)
    }

    /// Drains pending change notifications, oldest first.
    pub fn take_events(&mut self) -> Vec<TimelineEvent> {
        std::mem::take(&mut self.events)
    }

    // Monotonic counter scoped to this instance; skips ids the seed
    // already occupies so uniqueness holds for the whole session.
    fn allocate_id(&mut self) -> EntryId {
        loop {
            let candidate = format!("local-{}", self.next_local_id);
            self.next_local_id += 1;
            if !self.entries.iter().any(|e| e.id().as_str() == candidate) {
                return EntryId::from(candidate);
            }
        }
    }
}
