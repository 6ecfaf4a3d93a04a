//! Configuration management for Codelens
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (CODELENS_*)
//! 3. Config file (~/.config/codelens/config.toml)
//! 4. Default values
//!
//! Credentials are not part of this file, see [`crate::secrets`].

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default OpenAI-compatible gateway endpoint
pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1";

/// Default model requested from the gateway
pub const DEFAULT_MODEL: &str = "google/gemini-3-flash-preview";

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub bind: String,

    /// Maximum request body size in bytes (None = unlimited)
    pub max_body_bytes: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            max_body_bytes: None,
        }
    }
}

/// Language-model gateway configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base URL of the OpenAI-compatible API (without `/chat/completions`)
    pub base_url: String,

    /// Model to request
    pub model: String,

    /// Per-request timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Retries for connect/timeout failures only. HTTP statuses are never retried.
    pub max_retries: u32,

    /// Delay between retries
    #[serde(with = "humantime_serde")]
    pub retry_backoff: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GATEWAY_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(120),
            max_retries: 0,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

impl GatewayConfig {
    /// Full URL of the chat-completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: PathBuf,

    /// Maximum number of pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        let path = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("codelens")
            .join("codelens.db");

        Self {
            path,
            max_connections: 5,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Gateway configuration
    pub gateway: GatewayConfig,

    /// Database configuration
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/codelens/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("codelens").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - CODELENS_BIND: server bind address
    /// - CODELENS_GATEWAY_URL: gateway base URL
    /// - CODELENS_MODEL: model to request
    /// - CODELENS_DATABASE_PATH: SQLite database file
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(bind) = lookup("CODELENS_BIND") {
            self.server.bind = bind;
        }

        if let Some(url) = lookup("CODELENS_GATEWAY_URL") {
            self.gateway.base_url = url;
        }

        if let Some(model) = lookup("CODELENS_MODEL") {
            self.gateway.model = model;
        }

        if let Some(path) = lookup("CODELENS_DATABASE_PATH") {
            self.database.path = PathBuf::from(path);
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(
        mut self,
        bind: Option<String>,
        model: Option<String>,
        database: Option<PathBuf>,
    ) -> Self {
        if let Some(bind) = bind {
            self.server.bind = bind;
        }

        if let Some(m) = model {
            self.gateway.model = m;
        }

        if let Some(path) = database {
            self.database.path = path;
        }

        self
    }

    /// Check values that would otherwise fail later at request time
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.gateway.base_url).map_err(|e| {
            Error::Config(format!(
                "Invalid gateway base_url {}: {}",
                self.gateway.base_url, e
            ))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::Config(format!(
                "Gateway base_url must be http(s), got {}",
                url.scheme()
            )));
        }

        if self.gateway.model.trim().is_empty() {
            return Err(Error::Config("Gateway model must not be empty".to_string()));
        }

        if self.database.max_connections == 0 {
            return Err(Error::Config(
                "database.max_connections must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(
        bind: Option<String>,
        model: Option<String>,
        database: Option<PathBuf>,
    ) -> Result<Self> {
        let config = Self::load()?
            .with_env_overrides()
            .with_cli_overrides(bind, model, database);
        config.validate()?;
        Ok(config)
    }
}
