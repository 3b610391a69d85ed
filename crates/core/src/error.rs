//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Everything here is deterministic: the same state and the same action always
/// produce the same error. Presentation concerns (form field messages, config
/// parsing) have their own error types in the crates that own them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Rejected input: unknown status text, bad filter name.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Blank or unparsable invoice / line item id.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Update, status change or delete aimed at an id the store does not hold.
    #[error("not found: {0}")]
    NotFound(String),

    /// Create with an id that is already taken.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(id: impl core::fmt::Display) -> Self {
        Self::NotFound(id.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
