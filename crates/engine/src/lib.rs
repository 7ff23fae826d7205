//! Wordday Engine library.
//!
//! ## Structure
//!
//! - `repositories/` - Typed access to the stored ledger and current word
//! - `use_cases/` - Selection engine and session controller
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod repositories;
pub mod use_cases;

/// Test fixtures shared by the unit tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
