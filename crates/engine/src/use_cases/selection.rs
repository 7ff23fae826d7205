//! Selection engine - picks the next word and keeps the ledger and current
//! word register in step with it.
//!
//! Store failures never abort an operation. Reads that fail fall back to
//! empty defaults; writes that fail leave the in-memory result intact. Both
//! are collected as [`PersistenceIssue`]s on the report so the session can
//! tell the user that the result may not survive a restart.
//!
//! # Two-step commit
//!
//! The store has no transactions, so a selection is committed in two writes:
//!
//! 1. the ledger (with the new record at the front),
//! 2. the current word register.
//!
//! The register is only written after the ledger write succeeds. A process
//! interruption between the two writes leaves the register one word behind
//! the ledger front; that window is accepted and shows up as
//! `RegisterConsistency::Diverged` on the next start.

use std::fmt;
use std::sync::Arc;

use chrono::Local;
use wordday_domain::{
    select_next, DomainError, HistoryLedger, HistoryRecord, RegisterConsistency,
    SelectionOutcome, WordCatalog,
};

use crate::infrastructure::ports::{ClockPort, KeyValueStore, RandomPort, StoreError};
use crate::repositories::{CurrentWordRepository, HistoryRepository};

// =============================================================================
// Reports
// =============================================================================

/// Persistence step that an issue refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistStep {
    LoadHistory,
    LoadCurrentWord,
    SaveHistory,
    SaveCurrentWord,
    ClearHistory,
    ClearAll,
}

impl fmt::Display for PersistStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadHistory => write!(f, "loading history"),
            Self::LoadCurrentWord => write!(f, "loading current word"),
            Self::SaveHistory => write!(f, "saving history"),
            Self::SaveCurrentWord => write!(f, "saving current word"),
            Self::ClearHistory => write!(f, "clearing history"),
            Self::ClearAll => write!(f, "clearing storage"),
        }
    }
}

/// A store failure that was absorbed instead of propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceIssue {
    pub step: PersistStep,
    pub error: StoreError,
}

impl PersistenceIssue {
    pub fn new(step: PersistStep, error: StoreError) -> Self {
        Self { step, error }
    }

    /// Whether the failure may have lost data (as opposed to a failed read).
    pub fn is_write(&self) -> bool {
        !matches!(self.step, PersistStep::LoadHistory | PersistStep::LoadCurrentWord)
    }
}

impl fmt::Display for PersistenceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.step, self.error)
    }
}

/// Result of a selection-producing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionReport {
    pub outcome: SelectionOutcome,
    /// Ledger as the engine sees it after the operation.
    pub ledger: HistoryLedger,
    pub issues: Vec<PersistenceIssue>,
}

impl SelectionReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("Selection failed: {0}")]
    Domain(#[from] DomainError),
}

// =============================================================================
// Engine
// =============================================================================

pub struct SelectionEngine {
    catalog: Arc<WordCatalog>,
    history: HistoryRepository,
    current_word: CurrentWordRepository,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl SelectionEngine {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        catalog: Arc<WordCatalog>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            catalog,
            history: HistoryRepository::new(store.clone()),
            current_word: CurrentWordRepository::new(store.clone()),
            store,
            clock,
            random,
        }
    }

    pub fn catalog(&self) -> &WordCatalog {
        &self.catalog
    }

    /// Pick a word not yet in the stored ledger and commit it.
    ///
    /// Returns `Exhausted` without touching the store when every catalog
    /// word has been shown.
    pub async fn select_next(&self) -> Result<SelectionReport, SelectionError> {
        let mut issues = Vec::new();
        let ledger = self.load_ledger(&mut issues).await;
        self.select_from(ledger, issues).await
    }

    /// Pick a word not yet in `ledger` and commit it.
    ///
    /// `ledger` is the caller's view of history and is used as is; the stored
    /// ledger is not read. The commit overwrites the stored ledger with it,
    /// so a history write that failed earlier is repaired by the next one
    /// that succeeds.
    pub async fn select_next_from(
        &self,
        ledger: HistoryLedger,
    ) -> Result<SelectionReport, SelectionError> {
        self.select_from(ledger, Vec::new()).await
    }

    /// Startup: return the stored current word unchanged if there is one,
    /// otherwise select a new word. Never writes when a word is stored.
    pub async fn load_or_initialize(&self) -> Result<SelectionReport, SelectionError> {
        let mut issues = Vec::new();

        let register = match self.current_word.load().await {
            Ok(register) => register,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load current word, selecting a new one");
                issues.push(PersistenceIssue::new(PersistStep::LoadCurrentWord, e));
                None
            }
        };
        let ledger = self.load_ledger(&mut issues).await;

        let Some(record) = register else {
            return self.select_from(ledger, issues).await;
        };

        if let RegisterConsistency::Diverged { word } =
            RegisterConsistency::check(Some(&record), &ledger)
        {
            tracing::warn!(
                word = %word,
                ledger_front = ?ledger.front().map(HistoryRecord::word),
                "Current word does not match the most recent history entry"
            );
        }

        tracing::debug!(word = %record.word(), "Restored current word");
        Ok(SelectionReport {
            outcome: SelectionOutcome::Selected(record),
            ledger,
            issues,
        })
    }

    /// Empty the stored ledger. The current word register is left as is.
    pub async fn clear_history(&self) -> Result<(), PersistenceIssue> {
        self.history.clear().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to clear history");
            PersistenceIssue::new(PersistStep::ClearHistory, e)
        })?;
        tracing::info!("History cleared");
        Ok(())
    }

    /// Empty both the ledger and the register, then select against the
    /// empty ledger.
    ///
    /// If clearing fails the selection still runs against an empty ledger;
    /// its commit overwrites both keys, so storage converges anyway.
    pub async fn reset_all(&self) -> Result<SelectionReport, SelectionError> {
        let mut issues = Vec::new();
        if let Err(e) = self.store.clear_all().await {
            tracing::warn!(error = %e, "Failed to clear storage during reset");
            issues.push(PersistenceIssue::new(PersistStep::ClearAll, e));
        } else {
            tracing::info!("Storage cleared");
        }
        self.select_from(HistoryLedger::new(), issues).await
    }

    /// Read-only view of the stored ledger.
    pub async fn history(&self) -> Result<HistoryLedger, PersistenceIssue> {
        self.history
            .load()
            .await
            .map_err(|e| PersistenceIssue::new(PersistStep::LoadHistory, e))
    }

    async fn load_ledger(&self, issues: &mut Vec<PersistenceIssue>) -> HistoryLedger {
        let ledger = match self.history.load().await {
            Ok(ledger) => ledger,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load history, continuing with empty history");
                issues.push(PersistenceIssue::new(PersistStep::LoadHistory, e));
                HistoryLedger::new()
            }
        };

        let unknown = ledger.unknown_words(&self.catalog);
        if !unknown.is_empty() {
            tracing::warn!(words = ?unknown, "History contains words missing from the catalog");
        }
        ledger
    }

    async fn select_from(
        &self,
        mut ledger: HistoryLedger,
        mut issues: Vec<PersistenceIssue>,
    ) -> Result<SelectionReport, SelectionError> {
        let today = self.clock.now().with_timezone(&Local).date_naive();
        let outcome = select_next(&self.catalog, &ledger, today, |n| self.random.pick(n))?;

        match &outcome {
            SelectionOutcome::Selected(record) => {
                ledger.prepend(record.clone())?;
                self.commit(&ledger, record, &mut issues).await;
                tracing::info!(word = %record.word(), date = %record.date(), seen = ledger.len(), "Selected new word");
            }
            SelectionOutcome::Exhausted => {
                tracing::info!(catalog = self.catalog.len(), "All catalog words have been shown");
            }
        }

        Ok(SelectionReport {
            outcome,
            ledger,
            issues,
        })
    }

    async fn commit(
        &self,
        ledger: &HistoryLedger,
        record: &HistoryRecord,
        issues: &mut Vec<PersistenceIssue>,
    ) {
        if let Err(e) = self.history.replace(ledger).await {
            tracing::warn!(error = %e, word = %record.word(), "Failed to save history, not updating current word");
            issues.push(PersistenceIssue::new(PersistStep::SaveHistory, e));
            return;
        }

        if let Err(e) = self.current_word.set(record).await {
            tracing::warn!(error = %e, word = %record.word(), "Failed to save current word");
            issues.push(PersistenceIssue::new(PersistStep::SaveCurrentWord, e));
        }
    }
}
