//! Common error types for Hymnal

use thiserror::Error;

/// Common result type for Hymnal operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared across the workspace
///
/// Validation and conflict errors carry enough detail for the caller to fix
/// the input. Store failures are wrapped and surfaced generically.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing or invalid request field
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Duplicate unique key (banned artist name)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
