//! Codelens Server - HTTP surface for Codelens
//!
//! Exposes the review and test-generation endpoints plus the history reads,
//! wired to a [`ChatGateway`](codelens_gateway::ChatGateway) and a
//! [`ReviewStore`](codelens_db::ReviewStore) held in shared state.

pub mod app;
pub mod error;
mod handlers;

pub use app::{router, AppState};
pub use error::ApiError;
