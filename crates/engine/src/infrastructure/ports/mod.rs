//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Key-value storage (could swap JSON file -> platform storage)
//! - Clock/Random (for testing)

mod error;
mod store;
mod testing;

// =============================================================================
// Storage Port
// =============================================================================
pub use store::KeyValueStore;

#[cfg(test)]
pub use store::MockKeyValueStore;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::StoreError;
