//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An email address is missing or malformed.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// A phone number could not be normalized.
    #[error("invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    /// A verification code has the wrong shape (must be 6 digits).
    #[error("invalid verification code format: {0}")]
    InvalidCodeFormat(String),

    /// A display name is empty or unusable.
    #[error("invalid display name: {0}")]
    InvalidDisplayName(String),

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
