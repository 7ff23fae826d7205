//! History ledger - previously shown words, newest first.
//!
//! Invariant: no two records share a word. The ledger never checks catalog
//! membership on its own; `unknown_words` reports records that no longer
//! match the catalog so callers can flag them.

use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::WordCatalog;
use crate::entities::HistoryRecord;
use crate::error::DomainError;

/// Ordered, deduplicated sequence of shown words (front = most recent).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HistoryLedger {
    records: Vec<HistoryRecord>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from persisted records.
    ///
    /// Keeps the first (newest) occurrence of each word. Returns the ledger
    /// together with the words whose later duplicates were dropped.
    pub fn from_records(records: Vec<HistoryRecord>) -> (Self, Vec<String>) {
        let mut seen = HashSet::with_capacity(records.len());
        let mut dropped = Vec::new();
        let mut kept = Vec::with_capacity(records.len());

        for record in records {
            if seen.insert(record.word().to_string()) {
                kept.push(record);
            } else {
                dropped.push(record.word().to_string());
            }
        }

        (Self { records: kept }, dropped)
    }

    /// Add a freshly shown word at the front.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DuplicateWord` if the word is already recorded.
    pub fn prepend(&mut self, record: HistoryRecord) -> Result<(), DomainError> {
        if self.contains(record.word()) {
            return Err(DomainError::duplicate_word(record.word()));
        }
        self.records.insert(0, record);
        Ok(())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.records.iter().any(|r| r.word() == word)
    }

    /// Most recently shown record.
    pub fn front(&self) -> Option<&HistoryRecord> {
        self.records.first()
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<HistoryRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Words recorded in the ledger that the catalog does not contain.
    pub fn unknown_words<'a>(&'a self, catalog: &WordCatalog) -> Vec<&'a str> {
        self.records
            .iter()
            .map(HistoryRecord::word)
            .filter(|word| !catalog.contains(word))
            .collect()
    }
}

// ============================================================================
// Register consistency
// ============================================================================

/// How the current word register relates to the ledger.
///
/// `Diverged` is expected after "clear history" (the register keeps the word
/// on display while the ledger is emptied) and after an interrupted two-step
/// commit. It is reported, never repaired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterConsistency {
    /// No current word is recorded.
    Empty,
    /// The current word is the ledger's front record.
    Consistent,
    /// The current word is not the ledger's front record.
    Diverged { word: String },
}

impl RegisterConsistency {
    pub fn check(register: Option<&HistoryRecord>, ledger: &HistoryLedger) -> Self {
        match register {
            None => Self::Empty,
            Some(current) if ledger.front() == Some(current) => Self::Consistent,
            Some(current) => Self::Diverged {
                word: current.word().to_string(),
            },
        }
    }

    pub fn is_diverged(&self) -> bool {
        matches!(self, Self::Diverged { .. })
    }
}
