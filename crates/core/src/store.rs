//! Storage error surfaced by repository implementations.
//!
//! Use-cases do not interpret these; they are passed through to delivery as an
//! opaque persistence failure.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write (e.g. duplicate username).
    #[error("conflict: {0}")]
    Conflict(String),

    /// An update targeted a row that does not exist.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Any other storage failure (connection, query, decoding).
    #[error("database error: {0}")]
    Database(String),
}
