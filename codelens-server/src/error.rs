//! HTTP error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use codelens_db::Error as StoreError;
use codelens_gateway::Error as GatewayError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errors a handler can answer with
///
/// Every variant renders as `{"error": message}`. Messages are short fixed
/// texts; the underlying cause is logged, never sent to the client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A required field was absent or empty
    #[error("Missing required fields")]
    MissingFields,

    /// Body was not the expected JSON object
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Query string did not match the expected parameters
    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    /// Gateway call failed
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Review insert failed
    #[error("Failed to save review: {0}")]
    Save(#[source] StoreError),

    /// History read failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Status code and client-facing message
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::MissingFields => (StatusCode::BAD_REQUEST, "Missing required fields"),
            ApiError::InvalidBody(_) => (StatusCode::BAD_REQUEST, "Invalid request body"),
            ApiError::InvalidQuery(_) => (StatusCode::BAD_REQUEST, "Invalid query string"),
            ApiError::Gateway(e) => match e {
                GatewayError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "Rate limited"),
                GatewayError::PaymentRequired => (StatusCode::PAYMENT_REQUIRED, "Payment required"),
                GatewayError::NotConfigured => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI gateway API key not configured",
                ),
                GatewayError::MissingToolCall => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "No tool call in AI response",
                ),
                GatewayError::MalformedUpstreamPayload(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Malformed AI response")
                }
                GatewayError::Http(_) | GatewayError::Upstream { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "AI gateway error")
                }
            },
            ApiError::Save(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save review"),
            ApiError::Store(StoreError::NotFound(_)) => (StatusCode::NOT_FOUND, "Review not found"),
            ApiError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load reviews"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.parts();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
