//! `POST /generate-tests`

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use codelens_core::{TestKind, TestRequest, TestSuite};
use codelens_gateway::generate_tests as request_tests;
use serde::Deserialize;
use tracing::info;

use super::{parse_body, required};
use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateTestsBody {
    code: Option<String>,
    language: Option<String>,
}

/// Test cases are returned to the caller and never stored
pub(crate) async fn generate_tests(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TestSuite>, ApiError> {
    let body: GenerateTestsBody = parse_body(&body)?;

    let request = TestRequest::new(required(body.code)?, required(body.language)?);
    let gateway = state.gateway()?;

    info!(language = %request.language, code_len = request.code.len(), "Generating tests");

    let suite = request_tests(gateway, &request).await?;

    info!(
        count = suite.test_cases.len(),
        edge = suite.of_kind(TestKind::Edge).count(),
        boundary = suite.of_kind(TestKind::Boundary).count(),
        "Generated tests"
    );

    Ok(Json(suite))
}
