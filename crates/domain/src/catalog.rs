//! Word catalog - the fixed, ordered set of candidate words.
//!
//! A catalog is built once (from the shipped word list or a catalog file)
//! and never mutated afterwards. Words are unique within a catalog.

use std::collections::HashSet;

use crate::entities::WordEntry;
use crate::error::DomainError;

/// Shipped word list: `(word, definition, example)`.
const BUILTIN_WORDS: &[(&str, &str, &str)] = &[
    (
        "Serendipity",
        "The occurrence of events by chance in a happy way.",
        "Finding that rare book was pure serendipity.",
    ),
    (
        "Eloquent",
        "Fluent or persuasive in speaking or writing.",
        "She gave an eloquent speech.",
    ),
    (
        "Ephemeral",
        "Lasting for a very short time.",
        "Youth is ephemeral.",
    ),
    (
        "Ineffable",
        "Too great to be expressed in words.",
        "The beauty of the sunset was ineffable.",
    ),
];

/// Immutable, ordered collection of candidate words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCatalog {
    entries: Vec<WordEntry>,
}

impl WordCatalog {
    /// Build a catalog, validating every entry and uniqueness by word.
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation` if an entry has an invalid word
    /// - `DomainError::DuplicateWord` if two entries share a word
    pub fn new(entries: Vec<WordEntry>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            entry.validate()?;
            if !seen.insert(entry.word()) {
                return Err(DomainError::duplicate_word(entry.word()));
            }
        }
        Ok(Self { entries })
    }

    /// The word list shipped with the application.
    pub fn builtin() -> Self {
        // BUILTIN_WORDS is checked by `builtin_catalog_is_valid`.
        let entries = BUILTIN_WORDS
            .iter()
            .map(|(word, definition, example)| WordEntry::from_static(word, definition, example))
            .collect();
        Self { entries }
    }

    /// Parse a catalog from a JSON array of `{word, definition, example}`.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let entries: Vec<WordEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.iter().any(|e| e.word() == word)
    }

    pub fn get(&self, word: &str) -> Option<&WordEntry> {
        self.entries.iter().find(|e| e.word() == word)
    }
}
