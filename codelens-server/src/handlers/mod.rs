//! Request handlers

pub mod history;
pub mod review;
pub mod testgen;

use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Decode a JSON body regardless of its declared content type
pub(crate) fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

/// A field that is present and non-empty
pub(crate) fn required(field: Option<String>) -> Result<String, ApiError> {
    field
        .filter(|value| !value.is_empty())
        .ok_or(ApiError::MissingFields)
}
