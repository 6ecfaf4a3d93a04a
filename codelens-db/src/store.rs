//! Store abstraction used by the HTTP layer

use async_trait::async_trait;

use crate::models::{NewReview, ReviewRecord, ReviewSummary};
use crate::{Database, Result};

/// Review persistence as seen by request handlers
///
/// `Database` is the production implementation; handler tests substitute
/// in-memory doubles.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Insert one immutable review and return its generated id
    async fn insert_review(&self, review: &NewReview) -> Result<String>;

    /// Read a review by id
    async fn get_review(&self, id: &str) -> Result<ReviewRecord>;

    /// List a user's reviews, newest first
    async fn list_reviews(&self, user_id: &str, limit: Option<u32>) -> Result<Vec<ReviewSummary>>;
}

#[async_trait]
impl ReviewStore for Database {
    async fn insert_review(&self, review: &NewReview) -> Result<String> {
        self.reviews().insert(review).await
    }

    async fn get_review(&self, id: &str) -> Result<ReviewRecord> {
        self.reviews().get_by_id(id).await
    }

    async fn list_reviews(&self, user_id: &str, limit: Option<u32>) -> Result<Vec<ReviewSummary>> {
        self.reviews().list_by_user(user_id, limit).await
    }
}
