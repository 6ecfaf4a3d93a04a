//! History command - list a user's past reviews

use anyhow::Context;
use clap::Args;
use codelens_core::Config;
use codelens_db::Database;

/// List past reviews for a user, newest first
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Account whose reviews to list
    #[arg(short, long)]
    user: String,

    /// Maximum number of reviews to show
    #[arg(short, long, default_value_t = 20)]
    limit: u32,
}

impl HistoryArgs {
    /// Execute the history command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let db = Database::connect(&config.database)
            .await
            .context("Failed to open database")?;

        let reviews = db
            .reviews()
            .list_by_user(&self.user, Some(self.limit))
            .await
            .context("Failed to list reviews")?;

        if reviews.is_empty() {
            println!("No reviews for {}.", self.user);
            return Ok(());
        }

        println!(
            "{:<36}  {:<10}  {:<11}  {:>5}  CREATED",
            "ID", "LANGUAGE", "TYPE", "SCORE"
        );
        for review in &reviews {
            println!(
                "{:<36}  {:<10}  {:<11}  {:>5}  {}",
                review.id,
                review.language,
                review.review_type,
                review.score,
                review.created_at.format("%Y-%m-%d %H:%M")
            );
        }

        let total = db.reviews().count_by_user(&self.user).await?;
        if total > i64::from(self.limit) {
            println!();
            println!("Showing {} of {} reviews (use --limit to see more)", reviews.len(), total);
        }

        db.close().await;
        Ok(())
    }
}
