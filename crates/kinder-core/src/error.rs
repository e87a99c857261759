//! Error types for the kinder-core crate

use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur in tree operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Insertion rejected, the identifier is already stored
    #[error("Child with ID {0} already exists")]
    DuplicateIdentifier(u64),

    /// No record carries the requested identifier
    #[error("Child with ID {0} not found")]
    NotFound(u64),

    /// Record or update failed field validation
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Unknown traversal order name
    #[error("invalid traversal order: {0}")]
    InvalidOrder(String),
}

impl CoreError {
    /// Whether this error reports a missing record
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether this error reports an identifier collision
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateIdentifier(_))
    }
}
