//! Show command - print one stored review

use anyhow::Context;
use clap::Args;
use codelens_core::{Config, Severity};
use codelens_db::Database;

/// Show a stored review
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Review id
    id: String,

    /// Also print the submitted and rewritten code
    #[arg(long)]
    code: bool,
}

impl ShowArgs {
    /// Execute the show command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let db = Database::connect(&config.database)
            .await
            .context("Failed to open database")?;

        let review = db
            .reviews()
            .get_by_id(&self.id)
            .await
            .with_context(|| format!("Failed to load review {}", self.id))?;

        println!("Review {}", review.id);
        println!("  user:     {}", review.user_id);
        println!("  language: {}", review.language);
        println!("  type:     {}", review.review_type);
        println!("  score:    {}/100", review.score);
        println!("  created:  {}", review.created_at.to_rfc3339());
        println!();
        println!("{}", review.findings.summary);
        println!();

        if review.findings.findings.is_empty() {
            println!("No findings.");
        }
        for finding in &review.findings.findings {
            let marker = match finding.severity {
                Severity::Error => "E",
                Severity::Warning => "W",
                Severity::Info => "I",
            };
            let line = finding
                .line
                .map(|l| format!("line {}", l))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "[{}] {:?} ({}): {}",
                marker, finding.kind, line, finding.message
            );
            println!("    -> {}", finding.suggestion);
        }

        if self.code {
            println!();
            println!("--- original ---");
            println!("{}", review.original_code);
            if !review.rewritten_code.is_empty() {
                println!("--- rewritten ---");
                println!("{}", review.rewritten_code);
            }
        }

        db.close().await;
        Ok(())
    }
}
