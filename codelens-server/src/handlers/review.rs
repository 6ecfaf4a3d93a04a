//! `POST /review-code`

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use codelens_core::{Finding, Language, ReviewRequest, ReviewType, Severity};
use codelens_db::NewReview;
use codelens_gateway::suggest_review;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{parse_body, required};
use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewCodeBody {
    code: Option<String>,
    language: Option<String>,
    review_type: Option<String>,
    user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReviewCodeResponse {
    #[serde(rename = "reviewId")]
    review_id: String,
    findings: Vec<Finding>,
    summary: String,
    score: u8,
    rewritten_code: String,
}

pub(crate) async fn review_code(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ReviewCodeResponse>, ApiError> {
    let body: ReviewCodeBody = parse_body(&body)?;

    let code = required(body.code)?;
    let language = required(body.language)?;
    let user_id = required(body.user_id)?;
    let review_type = body
        .review_type
        .unwrap_or_else(|| ReviewType::All.as_str().to_string());

    let request = ReviewRequest::new(code, language, review_type);
    let gateway = state.gateway()?;

    info!(
        user_id = %user_id,
        language = %request.language,
        listed = Language::from_label(&request.language).is_some(),
        focus = %request.focus(),
        code_len = request.code.len(),
        "Reviewing code"
    );

    let payload = suggest_review(gateway, &request).await?;

    let review_id = state
        .store()
        .insert_review(&NewReview::new(user_id, &request, &payload))
        .await
        .map_err(ApiError::Save)?;

    info!(
        review_id = %review_id,
        score = payload.score,
        findings = payload.findings.len(),
        errors = payload.count_severity(Severity::Error),
        "Review saved"
    );

    Ok(Json(ReviewCodeResponse {
        review_id,
        findings: payload.findings,
        summary: payload.summary,
        score: payload.score,
        rewritten_code: payload.rewritten_code,
    }))
}
