//! Domain entity definitions.

mod account;
mod chat;
mod contact;
mod entry;

pub use account::Account;
pub use chat::{ChatId, ChatKind, ChatSummary};
pub use contact::{Contact, index_rail};
pub use entry::{ChatEntry, EntryId, MessageEntry, TimestampDivider};
