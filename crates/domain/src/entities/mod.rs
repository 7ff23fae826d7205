//! Domain entities - Core business objects

mod word;

pub use word::{HistoryRecord, WordEntry, RECORD_DATE_FORMAT};
