//! Session controller - drives the selection engine from user and lifecycle
//! events and keeps read-only snapshots for the presentation layer.
//!
//! States: `Loading -> { WordAvailable(record) | Exhausted }`. The controller
//! starts in `Loading` and enters it again for the duration of every
//! selection. Only one action runs at a time; an action arriving while
//! another is in flight is rejected with [`SessionError::Busy`] and does no
//! store I/O.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use wordday_domain::{
    HistoryLedger, HistoryRecord, Notification, RegisterConsistency, SelectionOutcome,
};

use super::selection::{PersistenceIssue, SelectionEngine, SelectionReport};

pub const EXHAUSTED_MESSAGE: &str = "No more new words! You have seen all available words.";
pub const RESET_MESSAGE: &str = "App Reset Successfully!";
pub const HISTORY_CLEARED_MESSAGE: &str = "History Cleared!";

/// What the home view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// A selection or persistence round trip is in flight (or the session
    /// has not started yet).
    Loading,
    WordAvailable(HistoryRecord),
    /// Every catalog word has been shown. Stable until a reset.
    Exhausted,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Another action is still in progress")]
    Busy,
    #[error("Session has not started yet")]
    NotStarted,
}

#[derive(Debug, Clone)]
struct Snapshot {
    state: SessionState,
    /// Register as last known; survives exhaustion and history clears.
    current: Option<HistoryRecord>,
    history: HistoryLedger,
}

/// Clears the in-flight flag when the action finishes, however it finishes.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct SessionController {
    engine: Arc<SelectionEngine>,
    snapshot: RwLock<Snapshot>,
    in_flight: AtomicBool,
}

impl SessionController {
    pub fn new(engine: Arc<SelectionEngine>) -> Self {
        Self {
            engine,
            snapshot: RwLock::new(Snapshot {
                state: SessionState::Loading,
                current: None,
                history: HistoryLedger::new(),
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    // -------------------------------------------------------------------------
    // Snapshots
    // -------------------------------------------------------------------------

    pub async fn state(&self) -> SessionState {
        self.snapshot.read().await.state.clone()
    }

    /// Word currently recorded as on display, even when `Exhausted`.
    pub async fn current_word(&self) -> Option<HistoryRecord> {
        self.snapshot.read().await.current.clone()
    }

    pub async fn history(&self) -> HistoryLedger {
        self.snapshot.read().await.history.clone()
    }

    /// Whether the displayed word is the newest history entry.
    pub async fn consistency(&self) -> RegisterConsistency {
        let snapshot = self.snapshot.read().await;
        RegisterConsistency::check(snapshot.current.as_ref(), &snapshot.history)
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    /// Restore the stored word, or select one if none is stored.
    pub async fn start(&self) -> Result<Notification, SessionError> {
        let _guard = self.begin()?;
        let previous = self.enter_loading().await;

        let notification = match self.engine.load_or_initialize().await {
            Ok(report) => {
                let word = report.outcome.record().map(|r| r.word().to_string());
                let message = match word {
                    Some(word) => format!("Word of the day: {word}"),
                    None => EXHAUSTED_MESSAGE.to_string(),
                };
                self.apply(report, message).await
            }
            Err(e) => self.restore(previous, format!("Could not load a word: {e}")).await,
        };
        Ok(notification)
    }

    /// Show a word that has not been shown before.
    ///
    /// Selects against the session's history, not the stored one, so a word
    /// whose history write failed is still treated as seen.
    pub async fn request_new_word(&self) -> Result<Notification, SessionError> {
        let _guard = self.begin()?;
        if self.state().await == SessionState::Loading {
            return Err(SessionError::NotStarted);
        }
        let previous = self.enter_loading().await;
        let ledger = self.history().await;

        let notification = match self.engine.select_next_from(ledger).await {
            Ok(report) => {
                let message = match report.outcome.record() {
                    Some(record) => format!("New word: {}", record.word()),
                    None => EXHAUSTED_MESSAGE.to_string(),
                };
                self.apply(report, message).await
            }
            Err(e) => self.restore(previous, format!("Could not pick a new word: {e}")).await,
        };
        Ok(notification)
    }

    /// Empty the history list. The displayed word and state stay as they are.
    pub async fn clear_history(&self) -> Result<Notification, SessionError> {
        let _guard = self.begin()?;

        let result = self.engine.clear_history().await;
        self.snapshot.write().await.history.clear();

        Ok(match result {
            Ok(()) => Notification::success(HISTORY_CLEARED_MESSAGE),
            Err(issue) => Notification::error(format!(
                "History cleared here but not in storage ({issue}); it may reappear after a restart."
            )),
        })
    }

    /// Forget everything and start over with a fresh word.
    pub async fn reset_all(&self) -> Result<Notification, SessionError> {
        let _guard = self.begin()?;
        let previous = self.enter_loading().await;

        let notification = match self.engine.reset_all().await {
            Ok(report) => {
                {
                    let mut snapshot = self.snapshot.write().await;
                    snapshot.current = None;
                }
                self.apply(report, RESET_MESSAGE.to_string()).await
            }
            Err(e) => self.restore(previous, format!("Could not reset: {e}")).await,
        };
        Ok(notification)
    }

    /// Re-read the history list from storage (pull to refresh).
    pub async fn refresh_history(&self) -> Result<Notification, SessionError> {
        let _guard = self.begin()?;

        Ok(match self.engine.history().await {
            Ok(ledger) => {
                let count = ledger.len();
                self.snapshot.write().await.history = ledger;
                Notification::success(format!("{count} word(s) in history"))
            }
            Err(issue) => Notification::error(format!("Could not refresh history ({issue})")),
        })
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn begin(&self) -> Result<InFlight<'_>, SessionError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                tracing::debug!("Ignoring action while another is in flight");
                SessionError::Busy
            })?;
        Ok(InFlight(&self.in_flight))
    }

    async fn enter_loading(&self) -> SessionState {
        let mut snapshot = self.snapshot.write().await;
        std::mem::replace(&mut snapshot.state, SessionState::Loading)
    }

    async fn restore(&self, previous: SessionState, message: String) -> Notification {
        tracing::error!(message = %message, "Session action failed");
        self.snapshot.write().await.state = previous;
        Notification::error(message)
    }

    async fn apply(&self, report: SelectionReport, message: String) -> Notification {
        let SelectionReport {
            outcome,
            ledger,
            issues,
        } = report;

        let mut snapshot = self.snapshot.write().await;
        snapshot.state = match outcome {
            SelectionOutcome::Selected(record) => {
                snapshot.current = Some(record.clone());
                SessionState::WordAvailable(record)
            }
            SelectionOutcome::Exhausted => SessionState::Exhausted,
        };
        snapshot.history = ledger;

        let consistency = RegisterConsistency::check(snapshot.current.as_ref(), &snapshot.history);
        if consistency.is_diverged() {
            tracing::warn!(consistency = ?consistency, "Displayed word is not the newest history entry");
        }
        let exhausted = snapshot.state == SessionState::Exhausted;
        drop(snapshot);

        notification_for(&message, &issues, exhausted)
    }
}

fn notification_for(message: &str, issues: &[PersistenceIssue], exhausted: bool) -> Notification {
    if issues.is_empty() {
        return if exhausted {
            Notification::info(message)
        } else {
            Notification::success(message)
        };
    }

    let details = issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    if issues.iter().any(PersistenceIssue::is_write) {
        Notification::error(format!(
            "{message} (not saved: {details}; changes may be lost after a restart)"
        ))
    } else {
        Notification::error(format!("{message} (saved data could not be read: {details})"))
    }
}
