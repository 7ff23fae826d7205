//! Use Cases - Application layer orchestration
//!
//! `SelectionEngine` owns the persisted state transitions (select, restore,
//! clear, reset). `SessionController` sits on top of it and turns those
//! transitions into a view state plus user-facing notifications.

pub mod selection;
pub mod session;

pub use selection::{PersistStep, PersistenceIssue, SelectionEngine, SelectionError, SelectionReport};
pub use session::{SessionController, SessionError, SessionState};
