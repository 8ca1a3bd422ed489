//! Error types shared by the stores and the request validator.
//!
//! # Design
//! Not-found is deliberately absent from `StoreError`: repositories report a
//! missing record as `None` / `false`, so every `StoreError` that reaches the
//! HTTP layer is an unexpected failure. `ValidationError` carries the exact
//! plain-text message returned to the client.

use thiserror::Error;

/// Result type returned by repository operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence-layer failure other than "record does not exist".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached (pool closed, I/O failure).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A database constraint rejected the operation.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// Any other driver or query failure.
    #[error("query failed: {0}")]
    Query(String),
}

/// Request payload rejected before reaching a repository.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    message: &'static str,
}

impl ValidationError {
    pub const POST: Self = Self {
        message: "Invalid title or content",
    };

    pub const USER: Self = Self {
        message: "Invalid name or lastName or age",
    };

    pub fn message(&self) -> &'static str {
        self.message
    }
}
