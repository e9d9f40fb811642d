//! Identifier newtypes for the crate's two index spaces.
//!
//! Entries live in the grid's flat entry list, words in the catalogue; both
//! are referenced everywhere by index. The newtypes keep the two spaces from
//! mixing at compile time.

use serde::{Deserialize, Serialize};

/// Index of an entry in the grid's entry list.
///
/// Ids follow discovery order: rows are scanned top-to-bottom, and at each
/// start cell an across entry is registered before a down entry. The order
/// is load-bearing for tie-breaking, so it is part of the grid contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u32);

impl EntryId {
    /// Create a new entry ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Index into the grid's entry list.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entry({})", self.0)
    }
}

/// Index of a word in the catalogue.
///
/// The catalogue is sorted lexicographically at build time, so ascending id
/// order is also alphabetical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WordId(pub u32);

impl WordId {
    /// Create a new word ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Index into the catalogue.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for WordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Word({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_id() {
        let id = EntryId::new(5);
        assert_eq!(id.index(), 5);
        assert_eq!(format!("{}", id), "Entry(5)");
    }

    #[test]
    fn test_word_id_ordering() {
        assert!(WordId::new(1) < WordId::new(2));
    }

    #[test]
    fn test_serialization() {
        let id = WordId::new(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: WordId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
