//! Contacts tab entities.

/// One entry of the contact directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    id: String,
    name: String,
}

impl Contact {
    /// Creates a new contact.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Returns the contact id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the letter this contact sorts under in the A-Z# index rail.
    ///
    /// Names that do not start with an ASCII letter (CJK names included)
    /// group under `#`, matching the trailing bucket of the rail.
    #[must_use]
    pub fn index_letter(&self) -> char {
        self.name
            .chars()
            .next()
            .filter(char::is_ascii_alphabetic)
            .map_or('#', |c| c.to_ascii_uppercase())
    }
}

/// The letters of the contacts index rail, `A` through `Z` plus `#`.
#[must_use]
pub fn index_rail() -> impl Iterator<Item = char> {
    ('A'..='Z').chain(std::iter::once('#'))
}
