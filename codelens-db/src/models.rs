//! Data models for database records

use chrono::{DateTime, Utc};
use codelens_core::{FindingsDocument, ReviewPayload, ReviewRequest};
use serde::{Deserialize, Serialize};

/// A review about to be inserted
///
/// The id and timestamp are assigned by the repository at insertion.
#[derive(Debug, Clone)]
pub struct NewReview {
    /// Submitting account
    pub user_id: String,

    /// Language label, verbatim
    pub language: String,

    /// Review type label, verbatim
    pub review_type: String,

    /// Submitted source code, verbatim
    pub original_code: String,

    /// Findings plus summary
    pub findings: FindingsDocument,

    /// Rewritten code (may be empty)
    pub rewritten_code: String,

    /// Quality score 0-100
    pub score: u8,
}

impl NewReview {
    /// Build a record from a submission and the model's answer
    pub fn new(user_id: impl Into<String>, request: &ReviewRequest, payload: &ReviewPayload) -> Self {
        Self {
            user_id: user_id.into(),
            language: request.language.clone(),
            review_type: request.review_type.clone(),
            original_code: request.code.clone(),
            findings: payload.findings_document(),
            rewritten_code: payload.rewritten_code.clone(),
            score: payload.score,
        }
    }
}

/// A stored review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub id: String,
    pub user_id: String,
    pub language: String,
    pub review_type: String,
    pub original_code: String,
    pub findings: FindingsDocument,
    pub rewritten_code: String,
    pub score: u8,
    pub created_at: DateTime<Utc>,
}

/// Row shape of `code_reviews`; `findings` is JSON text
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ReviewRow {
    pub id: String,
    pub user_id: String,
    pub language: String,
    pub review_type: String,
    pub original_code: String,
    pub findings: String,
    pub rewritten_code: String,
    pub score: u8,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for ReviewRecord {
    type Error = serde_json::Error;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        Ok(Self {
            findings: serde_json::from_str(&row.findings)?,
            id: row.id,
            user_id: row.user_id,
            language: row.language,
            review_type: row.review_type,
            original_code: row.original_code,
            rewritten_code: row.rewritten_code,
            score: row.score,
            created_at: row.created_at,
        })
    }
}

/// History listing entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReviewSummary {
    pub id: String,
    pub language: String,
    pub review_type: String,
    pub score: u8,
    pub created_at: DateTime<Utc>,
}
