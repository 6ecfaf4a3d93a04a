//! Error types for the review store

use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while opening, migrating or querying the review store
#[derive(Error, Debug)]
pub enum Error {
    /// Query or connection failure
    #[error("SQLite error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Embedded schema migrations failed to apply
    #[error("Failed to apply migrations: {0}")]
    Migration(String),

    /// Filesystem failure around the database file
    #[error("Database file error: {0}")]
    Io(String),

    /// The `findings` column held JSON that does not match the findings document
    #[error("Invalid findings document: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No review with the requested id
    #[error("{0}")]
    NotFound(String),
}

impl Error {
    /// Missing review for `id`
    pub(crate) fn review_not_found(id: &str) -> Self {
        Error::NotFound(format!("Review {} not found", id))
    }
}
