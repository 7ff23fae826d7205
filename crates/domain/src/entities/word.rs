//! Word entities - catalog entries and the dated records produced from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Format used for the `date` field of a history record (e.g. `6/15/2025`).
pub const RECORD_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Maximum length of a catalog word after trimming.
const MAX_WORD_LENGTH: usize = 100;

// ============================================================================
// WordEntry
// ============================================================================

/// A candidate word in the catalog (immutable once built).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordEntry {
    word: String,
    definition: String,
    example: String,
}

impl WordEntry {
    /// Create a validated catalog entry.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the word is empty after trimming
    /// or exceeds 100 characters.
    pub fn new(
        word: impl Into<String>,
        definition: impl Into<String>,
        example: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let entry = Self {
            word: word.into().trim().to_string(),
            definition: definition.into(),
            example: example.into(),
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Build an entry from compile-time data without validation.
    pub(crate) fn from_static(word: &str, definition: &str, example: &str) -> Self {
        Self {
            word: word.to_string(),
            definition: definition.to_string(),
            example: example.to_string(),
        }
    }

    /// Check the invariants that deserialization cannot enforce on its own.
    pub(crate) fn validate(&self) -> Result<(), DomainError> {
        let trimmed = self.word.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Word cannot be empty"));
        }
        if trimmed.len() != self.word.len() {
            return Err(DomainError::validation(format!(
                "Word '{}' has surrounding whitespace",
                self.word
            )));
        }
        if trimmed.chars().count() > MAX_WORD_LENGTH {
            return Err(DomainError::validation(format!(
                "Word cannot exceed {} characters",
                MAX_WORD_LENGTH
            )));
        }
        Ok(())
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn example(&self) -> &str {
        &self.example
    }

    /// Stamp this entry with the day it was shown.
    pub fn stamp(&self, date: NaiveDate) -> HistoryRecord {
        HistoryRecord {
            word: self.word.clone(),
            definition: self.definition.clone(),
            example: self.example.clone(),
            date: date.format(RECORD_DATE_FORMAT).to_string(),
        }
    }
}

impl fmt::Display for WordEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.word)
    }
}

// ============================================================================
// HistoryRecord
// ============================================================================

/// A word as it was shown on a given day.
///
/// The serialized field set (`word`, `definition`, `example`, `date`) is the
/// persisted format for both the history ledger and the current word, so it
/// must stay stable across versions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryRecord {
    word: String,
    definition: String,
    example: String,
    date: String,
}

impl HistoryRecord {
    /// Rebuild a record from its raw parts (persisted data, fixtures).
    pub fn new(
        word: impl Into<String>,
        definition: impl Into<String>,
        example: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            definition: definition.into(),
            example: example.into(),
            date: date.into(),
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn example(&self) -> &str {
        &self.example
    }

    /// Calendar date the word was shown, as `M/D/YYYY`.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Parse the stored date back into a calendar date, if it is well formed.
    pub fn shown_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%m/%d/%Y").ok()
    }
}

impl fmt::Display for HistoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.word, self.date)
    }
}
