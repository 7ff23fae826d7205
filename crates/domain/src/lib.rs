//! Wordday domain - catalog, history ledger, and selection rules.
//!
//! Everything here is synchronous and free of I/O. Persistence, clocks, and
//! randomness live in the engine and are passed in.

pub mod catalog;
pub mod entities;
pub mod error;
pub mod history;
pub mod notification;
pub mod selection;

pub use catalog::WordCatalog;
pub use entities::{HistoryRecord, WordEntry, RECORD_DATE_FORMAT};
pub use error::DomainError;
pub use history::{HistoryLedger, RegisterConsistency};
pub use notification::{Notification, NotificationKind};
pub use selection::{available, select_next, SelectionOutcome};
