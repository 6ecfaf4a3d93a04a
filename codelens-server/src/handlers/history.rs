//! History reads: `GET /reviews` and `GET /reviews/{id}`

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use codelens_db::{ReviewRecord, ReviewSummary};
use serde::Deserialize;

use super::required;
use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HistoryQuery {
    user_id: Option<String>,
    limit: Option<u32>,
}

pub(crate) async fn list_reviews(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Vec<ReviewSummary>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    let user_id = required(query.user_id)?;
    let reviews = state.store().list_reviews(&user_id, query.limit).await?;
    Ok(Json(reviews))
}

pub(crate) async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReviewRecord>, ApiError> {
    Ok(Json(state.store().get_review(&id).await?))
}
