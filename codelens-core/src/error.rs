//! Error types for configuration and secrets loading

use thiserror::Error;

/// Result type alias for codelens-core
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to read or interpret local settings
#[derive(Error, Debug)]
pub enum Error {
    /// Reading a config or secrets file failed
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// A config or secrets file was unparsable, insecure or invalid
    #[error("Invalid configuration: {0}")]
    Config(String),
}
