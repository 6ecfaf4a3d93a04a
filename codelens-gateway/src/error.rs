//! Error types for gateway operations

use thiserror::Error;

/// Result type for gateway operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while calling the language-model gateway
#[derive(Error, Debug)]
pub enum Error {
    /// No API key was configured
    #[error("AI gateway API key not configured")]
    NotConfigured,

    /// Transport failure (connect, timeout, TLS)
    #[error("AI gateway request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway answered 429
    #[error("AI gateway rate limit exceeded")]
    RateLimited,

    /// Gateway answered 402
    #[error("AI gateway requires payment")]
    PaymentRequired,

    /// Any other non-success status
    #[error("AI gateway returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Reply carried no tool call
    #[error("No tool call in AI response")]
    MissingToolCall,

    /// Reply or tool arguments did not match the expected contract
    #[error("Malformed AI response: {0}")]
    MalformedUpstreamPayload(String),
}

impl Error {
    /// Classify a non-success HTTP status from the gateway
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            429 => Error::RateLimited,
            402 => Error::PaymentRequired,
            _ => Error::Upstream { status, body },
        }
    }
}
