//! Domain error model.

use thiserror::Error;

/// Result type used across the use-case layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business failures (validation, lookups,
/// credentials). Storage failures are [`crate::StoreError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was empty. `field` is a stable, machine-readable key
    /// such as `users_username_key`.
    #[error("{field} can't be empty")]
    MissingField { field: &'static str },

    /// A field was present but malformed (e.g. an email without `@`).
    #[error("{field} is invalid")]
    InvalidField { field: &'static str },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested record was not found.
    #[error("not found")]
    NotFound,

    /// Login failed. Deliberately says nothing about which part was wrong.
    #[error("invalid credentials")]
    InvalidCredentials,
}

impl DomainError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn invalid(field: &'static str) -> Self {
        Self::InvalidField { field }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Field key for validation errors, `None` for everything else.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field } | Self::InvalidField { field } => Some(field),
            _ => None,
        }
    }
}
