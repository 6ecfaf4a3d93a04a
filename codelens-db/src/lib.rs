//! Database layer for Codelens
//!
//! Persists review records and serves the history reads.

pub mod error;
pub mod models;
pub mod repos;
mod store;

use codelens_core::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

pub use error::{Error, Result};
pub use models::{NewReview, ReviewRecord, ReviewSummary};
pub use repos::ReviewsRepo;
pub use store::ReviewStore;

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database described by `config` and run migrations
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        Self::open(&config.path, config.max_connections).await
    }

    /// Create a new database connection from a file path
    pub async fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        Self::open(db_path.as_ref(), DatabaseConfig::default().max_connections).await
    }

    async fn open(db_path: &Path, max_connections: u32) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Io(format!("Failed to create database directory: {}", e)))?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path.display()))?
            .create_if_missing(true)
            .disable_statement_logging();

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| Error::Migration(e.to_string()))?;

        info!(path = %db_path.display(), "Database ready");

        Ok(Self { pool })
    }

    /// Get the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get the reviews repository
    pub fn reviews(&self) -> ReviewsRepo {
        ReviewsRepo::new(self.pool.clone())
    }

    /// Close the database connection
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_database_creation() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("test.db");

        let db = Database::new(&db_path).await.unwrap();
        assert!(db_path.exists());
        db.close().await;
    }

    #[tokio::test]
    async fn test_database_migrations() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::new(&db_path).await.unwrap();

        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='code_reviews'",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();
        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    async fn test_reopen_keeps_data() {
        let temp_dir = TempDir::new().unwrap();
        let config = DatabaseConfig {
            path: temp_dir.path().join("test.db"),
            max_connections: 2,
        };

        let db = Database::connect(&config).await.unwrap();
        sqlx::query(
            "INSERT INTO code_reviews (id, user_id, language, review_type, original_code, findings, score, created_at)
             VALUES ('r1', 'u1', 'Go', 'all', 'package main', '{\"findings\":[],\"summary\":\"\"}', 90, '2025-01-01T00:00:00Z')",
        )
        .execute(db.pool())
        .await
        .unwrap();
        db.close().await;

        let db = Database::connect(&config).await.unwrap();
        assert_eq!(db.reviews().count_by_user("u1").await.unwrap(), 1);
    }
}
