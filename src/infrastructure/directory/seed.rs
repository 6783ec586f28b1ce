//! Seed fixtures standing in for a server-side directory.

use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;

use crate::domain::entities::{
    ChatEntry, ChatId, ChatSummary, Contact, MessageEntry, TimestampDivider,
};

/// Nickname of the built-in demo account.
pub const DEMO_NICKNAME: &str = "Me";
/// Username of the built-in demo account.
pub const DEMO_USERNAME: &str = "demo";
/// Password of the built-in demo account.
pub const DEMO_PASSWORD: &str = "demo123";

fn afternoon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 20, 14, 44, 0).unwrap()
}

/// Returns the seeded chat list, most recently active first.
#[must_use]
pub fn chats() -> Vec<ChatSummary> {
    let when = afternoon();
    vec![
        ChatSummary::new("1", "妈妈", "好的,去吧", when),
        ChatSummary::new("2", "闺蜜", "对啊 哈哈", when),
        ChatSummary::new("3", "姐姐", "OK", when),
        ChatSummary::new("4", "疯子群", "哈哈哈哈哈", when)
            .group()
            .with_unread(20),
        ChatSummary::new("5", "Leo", "Noooooo", when),
        ChatSummary::new("6", "家长群", "真好！", when)
            .group()
            .with_unread(2),
    ]
}

/// Returns the seeded contact directory.
#[must_use]
pub fn contacts() -> Vec<Contact> {
    let mut contacts = vec![
        Contact::new("c1", "妈妈"),
        Contact::new("c2", "闺蜜"),
        Contact::new("c3", "姐姐"),
        Contact::new("c4", "Leo"),
    ];
    for i in 0..11 {
        contacts.push(Contact::new(format!("c{}", 5 + i), "用友"));
    }
    contacts
}

/// Returns the seeded conversation histories, newest-first per chat.
#[must_use]
pub fn conversations() -> HashMap<ChatId, Vec<ChatEntry>> {
    let mut map = HashMap::new();

    map.insert(
        ChatId::from("1"),
        vec![
            MessageEntry::new("4", "好的妈妈", true, DEMO_NICKNAME).into(),
            MessageEntry::new("3", "记得早点回家", false, "妈妈").into(),
            TimestampDivider::new("2", "12分钟前").into(),
            MessageEntry::new("1", "我出门了", true, DEMO_NICKNAME).into(),
        ],
    );

    map.insert(
        ChatId::from("2"),
        vec![
            MessageEntry::new("3", "对啊 哈哈", false, "闺蜜").into(),
            MessageEntry::new("2", "她真的这么说了？", true, DEMO_NICKNAME).into(),
            TimestampDivider::new("1", "1小时前").into(),
        ],
    );

    map.insert(
        ChatId::from("3"),
        vec![
            MessageEntry::new("2", "OK", false, "姐姐").into(),
            MessageEntry::new("1", "周末记得带伞", true, DEMO_NICKNAME).into(),
        ],
    );

    map.insert(
        ChatId::from("4"),
        vec![
            MessageEntry::new("4", "哈哈哈哈哈", false, "Coco").into(),
            MessageEntry::new("3", "这也太离谱了", false, "阿强").into(),
            TimestampDivider::new("2", "昨天").into(),
            MessageEntry::new("1", "看看这个", true, DEMO_NICKNAME).into(),
        ],
    );

    map.insert(
        ChatId::from("5"),
        vec![
            MessageEntry::new("3", "Noooooo", false, "Leo").into(),
            MessageEntry::new("2", "They lost again", true, DEMO_NICKNAME).into(),
            TimestampDivider::new("1", "2小时前").into(),
        ],
    );

    map.insert(
        ChatId::from("6"),
        vec![
            MessageEntry::new("2", "真好！", false, "班主任").into(),
            MessageEntry::new("1", "孩子这次考得不错", false, "班主任").into(),
        ],
    );

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_chat_has_a_history() {
        let conversations = conversations();
        for chat in chats() {
            assert!(
                conversations.contains_key(chat.id()),
                "chat {} has no seed history",
                chat.id()
            );
        }
    }

    #[test]
    fn test_histories_uphold_entry_invariants() {
        for (chat, entries) in conversations() {
            let ids: HashSet<&str> = entries.iter().map(|e| e.id().as_str()).collect();
            assert_eq!(ids.len(), entries.len(), "duplicate id in chat {chat}");

            for entry in &entries {
                if let Some(message) = entry.as_message() {
                    assert!(
                        !message.text().trim().is_empty(),
                        "blank message in chat {chat}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_previews_match_newest_message() {
        let conversations = conversations();
        for chat in chats() {
            let newest = conversations[chat.id()]
                .iter()
                .find_map(ChatEntry::as_message)
                .expect("seed history has at least one message");
            assert_eq!(chat.last_message(), newest.text());
        }
    }
}
