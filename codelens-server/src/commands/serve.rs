//! Serve command - run the HTTP service

use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use codelens_core::{Config, Secrets};
use codelens_db::{Database, ReviewStore};
use codelens_gateway::{ChatGateway, Error as GatewayError, GatewayClient};
use codelens_server::{router, AppState};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Run the review service
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Reject request bodies larger than this many bytes
    #[arg(long, env = "CODELENS_MAX_BODY_BYTES")]
    max_body_bytes: Option<usize>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let secrets = Secrets::load().context("Failed to load secrets")?;

        let gateway: Option<Arc<dyn ChatGateway>> =
            match GatewayClient::from_secrets(config.gateway.clone(), &secrets) {
                Ok(client) => Some(Arc::new(client)),
                Err(GatewayError::NotConfigured) => {
                    warn!(
                        "AI gateway API key not configured; set CODELENS_GATEWAY_API_KEY or \
                         add it to secrets.toml. Review and test requests will fail."
                    );
                    None
                }
                Err(e) => return Err(e).context("Failed to create gateway client"),
            };

        let db = Database::connect(&config.database)
            .await
            .context("Failed to open database")?;
        let store: Arc<dyn ReviewStore> = Arc::new(db.clone());

        let state = AppState::new(gateway, store)
            .with_max_body_bytes(self.max_body_bytes.or(config.server.max_body_bytes));

        let listener = TcpListener::bind(&config.server.bind)
            .await
            .with_context(|| format!("Failed to bind {}", config.server.bind))?;

        info!(addr = %listener.local_addr()?, "Codelens listening");

        axum::serve(listener, router(state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        info!("Shutting down");
        db.close().await;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
