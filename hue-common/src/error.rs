//! Common error types for HUE

use thiserror::Error;

/// Common result type for HUE operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across HUE crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed questionnaire answer or request value
    #[error("Validation error: {0}")]
    Validation(String),

    /// Durable store or image store rejected a read or write
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl Error {
    /// True for failures of the durable layer (store, database, encoding)
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Error::Persistence(_) | Error::Database(_) | Error::Serialization(_) | Error::Io(_)
        )
    }
}
