//! Error types for ProTicket auth.

use thiserror::Error;

/// Common error type for ProTicket auth infrastructure.
#[derive(Error, Debug)]
pub enum AppError {
    /// Database error.
    ///
    /// Wraps any failure reported by the database backend that is not a
    /// constraint conflict (connection loss, pool timeout, SQL errors).
    #[error("database error: {0}")]
    Database(String),

    /// A unique constraint rejected the write.
    #[error("constraint conflict: {0}")]
    Conflict(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict(db.message().to_string())
            }
            other => AppError::Database(other.to_string()),
        }
    }
}

/// Result type alias for ProTicket auth operations.
pub type Result<T> = std::result::Result<T, AppError>;
