//! Router construction and shared state

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::header::{HeaderName, ACCESS_CONTROL_ALLOW_HEADERS};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use codelens_db::ReviewStore;
use codelens_gateway::{ChatGateway, Error as GatewayError};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::handlers;

/// Headers browsers may send with cross-origin requests
const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type, \
    x-supabase-client-platform, x-supabase-client-platform-version, \
    x-supabase-client-runtime, x-supabase-client-runtime-version";

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// `None` when no API key is configured
    gateway: Option<Arc<dyn ChatGateway>>,
    store: Arc<dyn ReviewStore>,
    max_body_bytes: Option<usize>,
}

impl AppState {
    pub fn new(gateway: Option<Arc<dyn ChatGateway>>, store: Arc<dyn ReviewStore>) -> Self {
        Self {
            gateway,
            store,
            max_body_bytes: None,
        }
    }

    /// Cap request bodies at `limit` bytes
    pub fn with_max_body_bytes(mut self, limit: Option<usize>) -> Self {
        self.max_body_bytes = limit;
        self
    }

    pub(crate) fn gateway(&self) -> Result<&dyn ChatGateway, ApiError> {
        self.gateway
            .as_deref()
            .ok_or(ApiError::Gateway(GatewayError::NotConfigured))
    }

    pub(crate) fn store(&self) -> &dyn ReviewStore {
        self.store.as_ref()
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let body_limit = match state.max_body_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/review-code", post(handlers::review::review_code))
        .route("/generate-tests", post(handlers::testgen::generate_tests))
        .route("/reviews", get(handlers::history::list_reviews))
        .route("/reviews/{id}", get(handlers::history::get_review))
        .with_state(state)
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
}

/// Permissive CORS: any origin; OPTIONS answered with an empty 200
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_headers(
            ALLOWED_HEADERS
                .split(", ")
                .map(HeaderName::from_static)
                .collect::<Vec<_>>(),
        )
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}
