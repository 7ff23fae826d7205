//! Next-word selection.
//!
//! Selection is pure: it reads the catalog and ledger and returns an outcome.
//! Persisting the outcome (prepend to ledger, overwrite current word) is the
//! caller's job. Randomness comes in as a closure so callers decide the
//! source and tests can pin the order.

use chrono::NaiveDate;

use crate::catalog::WordCatalog;
use crate::entities::{HistoryRecord, WordEntry};
use crate::error::DomainError;
use crate::history::HistoryLedger;

/// Result of asking for the next word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// A word to show; it is not yet recorded in any ledger.
    Selected(HistoryRecord),
    /// Every catalog word has already been shown.
    Exhausted,
}

impl SelectionOutcome {
    pub fn record(&self) -> Option<&HistoryRecord> {
        match self {
            Self::Selected(record) => Some(record),
            Self::Exhausted => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

/// Catalog entries whose word is not in the ledger, in catalog order.
pub fn available<'a>(catalog: &'a WordCatalog, ledger: &HistoryLedger) -> Vec<&'a WordEntry> {
    catalog
        .iter()
        .filter(|entry| !ledger.contains(entry.word()))
        .collect()
}

/// Pick the next word uniformly among unseen catalog entries.
///
/// `pick` receives the number of available entries `n` (always > 0) and must
/// return an index in `0..n`. It is not called when the catalog is exhausted.
///
/// # Errors
///
/// Returns `DomainError::Constraint` if `pick` returns an out-of-range index.
pub fn select_next<F>(
    catalog: &WordCatalog,
    ledger: &HistoryLedger,
    today: NaiveDate,
    pick: F,
) -> Result<SelectionOutcome, DomainError>
where
    F: FnOnce(usize) -> usize,
{
    let candidates = available(catalog, ledger);
    if candidates.is_empty() {
        return Ok(SelectionOutcome::Exhausted);
    }

    let index = pick(candidates.len());
    let entry = candidates.get(index).ok_or_else(|| {
        DomainError::constraint(format!(
            "Random index {} out of range for {} available words",
            index,
            candidates.len()
        ))
    })?;

    Ok(SelectionOutcome::Selected(entry.stamp(today)))
}
