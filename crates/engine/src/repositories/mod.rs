//! Repository modules - Data access wrappers around the storage port.
//!
//! Each repository owns one persisted key and the (de)serialization of the
//! record shape stored under it.

pub mod current_word;
pub mod history;

pub use current_word::{CurrentWordRepository, CURRENT_WORD_KEY};
pub use history::{HistoryRepository, LedgerError, HISTORY_KEY};
