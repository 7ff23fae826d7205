//! Unified error types for the domain layer
//!
//! Provides a common error type for catalog construction and ledger
//! mutations, so adapters never have to fall back to String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., empty word)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Parse error (catalog files, persisted records)
    #[error("Parse error: {0}")]
    Parse(String),

    /// A word appears twice where words must be unique
    #[error("Duplicate word: {0}")]
    DuplicateWord(String),
}

impl DomainError {
    /// Creates a validation error for malformed input values.
    ///
    /// # Example
    /// ```ignore
    /// if word.is_empty() {
    ///     return Err(DomainError::validation("Word cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Creates a parse error for data that does not match the expected shape.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a duplicate word error
    pub fn duplicate_word(word: impl Into<String>) -> Self {
        Self::DuplicateWord(word.into())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
