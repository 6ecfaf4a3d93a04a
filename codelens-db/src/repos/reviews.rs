//! Repository for review records

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::models::{NewReview, ReviewRecord, ReviewRow, ReviewSummary};
use crate::{Error, Result};

/// Repository for the `code_reviews` table
///
/// Insert-only: records are never updated or deleted.
pub struct ReviewsRepo {
    pool: SqlitePool,
}

impl ReviewsRepo {
    /// Create a new repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a review and return its generated id
    pub async fn insert(&self, review: &NewReview) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let findings_json = serde_json::to_string(&review.findings)?;

        sqlx::query(
            r#"
            INSERT INTO code_reviews (
                id, user_id, language, review_type, original_code,
                findings, rewritten_code, score, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&review.user_id)
        .bind(&review.language)
        .bind(&review.review_type)
        .bind(&review.original_code)
        .bind(&findings_json)
        .bind(&review.rewritten_code)
        .bind(review.score)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        debug!(review_id = %id, user_id = %review.user_id, "Inserted review");

        Ok(id)
    }

    /// Get a review by id
    pub async fn get_by_id(&self, id: &str) -> Result<ReviewRecord> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT id, user_id, language, review_type, original_code,
                   findings, rewritten_code, score, created_at
            FROM code_reviews
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => Error::review_not_found(id),
            e => e.into(),
        })?;

        Ok(ReviewRecord::try_from(row)?)
    }

    /// List a user's reviews, newest first
    pub async fn list_by_user(&self, user_id: &str, limit: Option<u32>) -> Result<Vec<ReviewSummary>> {
        // SQLite treats a negative LIMIT as "no limit"
        let limit = limit.map(i64::from).unwrap_or(-1);

        sqlx::query_as::<_, ReviewSummary>(
            r#"
            SELECT id, language, review_type, score, created_at
            FROM code_reviews
            WHERE user_id = ?
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }

    /// Count a user's reviews
    pub async fn count_by_user(&self, user_id: &str) -> Result<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM code_reviews WHERE user_id = ?")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
