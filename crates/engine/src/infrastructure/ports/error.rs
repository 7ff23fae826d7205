//! Error types for port operations.

/// Key-value storage errors with context for debugging.
///
/// Cloneable so that the same failure can be logged, reported to the
/// session, and kept in a persistence report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Reading a key failed.
    #[error("Storage read failed for '{key}': {message}")]
    Read { key: String, message: String },

    /// Writing or removing a key failed.
    #[error("Storage write failed for '{key}': {message}")]
    Write { key: String, message: String },

    /// The store as a whole could not be reached.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Create a Read error with key context.
    pub fn read(key: impl Into<String>, message: impl ToString) -> Self {
        Self::Read {
            key: key.into(),
            message: message.to_string(),
        }
    }

    /// Create a Write error with key context.
    pub fn write(key: impl Into<String>, message: impl ToString) -> Self {
        Self::Write {
            key: key.into(),
            message: message.to_string(),
        }
    }

    /// Create an Unavailable error.
    pub fn unavailable(message: impl ToString) -> Self {
        Self::Unavailable(message.to_string())
    }

    /// Check if this error happened while reading.
    pub fn is_read(&self) -> bool {
        matches!(self, Self::Read { .. })
    }
}
