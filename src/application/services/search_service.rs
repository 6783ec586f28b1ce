//! Fuzzy search over chats and contacts.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::domain::entities::{ChatSummary, Contact};

/// Fuzzy filter backing the search bars of the chats and contacts tabs.
pub struct SearchService {
    matcher: SkimMatcherV2,
}

impl SearchService {
    /// Creates new search service.
    #[must_use]
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Filters chats by name or last-message preview. An empty query
    /// keeps the original order and every row.
    #[must_use]
    pub fn filter_chats<'a>(&self, chats: &'a [ChatSummary], query: &str) -> Vec<&'a ChatSummary> {
        self.rank(chats, query, |chat| {
            format!("{} {}", chat.name(), chat.last_message())
        })
    }

    /// Filters contacts by name.
    #[must_use]
    pub fn filter_contacts<'a>(&self, contacts: &'a [Contact], query: &str) -> Vec<&'a Contact> {
        self.rank(contacts, query, |contact| contact.name().to_string())
    }

    fn rank<'a, T>(
        &self,
        items: &'a [T],
        query: &str,
        haystack: impl Fn(&T) -> String,
    ) -> Vec<&'a T> {
        let query = query.trim();
        if query.is_empty() {
            return items.iter().collect();
        }

        let mut scored: Vec<(i64, &T)> = items
            .iter()
            .filter_map(|item| {
                self.matcher
                    .fuzzy_match(&haystack(item), query)
                    .map(|score| (score, item))
            })
            .collect();
        scored.sort_by(|(a, _), (b, _)| b.cmp(a));
        scored.into_iter().map(|(_, item)| item).collect()
    }
}

impl Default for SearchService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn chats() -> Vec<ChatSummary> {
        let when = Utc.with_ymd_and_hms(2024, 5, 20, 14, 44, 0).unwrap();
        vec![
            ChatSummary::new("1", "妈妈", "好的,去吧", when),
            ChatSummary::new("5", "Leo", "Noooooo", when),
            ChatSummary::new("6", "家长群", "真好！", when),
        ]
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let service = SearchService::new();
        let chats = chats();

        let filtered = service.filter_chats(&chats, "  ");

        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered[0].name(), "妈妈");
    }

    #[test]
    fn test_filter_by_name() {
        let service = SearchService::new();
        let chats = chats();

        let filtered = service.filter_chats(&chats, "Leo");

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id().as_str(), "5");
    }

    #[test]
    fn test_filter_matches_last_message() {
        let service = SearchService::new();
        let chats = chats();

        let filtered = service.filter_chats(&chats, "Nooo");

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name(), "Leo");
    }

    #[test]
    fn test_filter_contacts() {
        let service = SearchService::new();
        let contacts = vec![Contact::new("1", "用友"), Contact::new("2", "Leo")];

        let filtered = service.filter_contacts(&contacts, "leo");

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name(), "Leo");
    }
}
