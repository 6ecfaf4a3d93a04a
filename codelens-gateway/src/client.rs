//! Gateway client using reqwest

use async_trait::async_trait;
use codelens_core::{GatewayConfig, ReviewPayload, ReviewRequest, Secrets, TestRequest, TestSuite};
use reqwest::Client;
use tracing::{debug, error, info, warn};

use crate::chat::{CompletionResponse, ToolCall, ToolRequest};
use crate::tools::{GENERATE_TESTS, SUGGEST_REVIEW};
use crate::{Error, Result};

/// Anything that can answer a forced tool call
///
/// The HTTP client implements this; tests substitute in-process doubles.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Send one request and return the first tool call of the first choice
    async fn call_tool(&self, request: &ToolRequest) -> Result<ToolCall>;
}

/// HTTP client for an OpenAI-compatible chat-completions endpoint
pub struct GatewayClient {
    http: Client,
    config: GatewayConfig,
    api_key: String,
}

impl GatewayClient {
    /// Create a client with an explicit API key
    pub fn new(config: GatewayConfig, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::NotConfigured);
        }

        let http = Client::builder().timeout(config.timeout).build()?;

        info!(url = %config.completions_url(), model = %config.model, "Created gateway client");

        Ok(Self {
            http,
            config,
            api_key,
        })
    }

    /// Create a client with the key resolved from secrets
    ///
    /// Key is loaded from (in priority order):
    /// 1. CODELENS_GATEWAY_API_KEY environment variable
    /// 2. ~/.config/codelens/secrets.toml
    pub fn from_secrets(config: GatewayConfig, secrets: &Secrets) -> Result<Self> {
        let api_key = secrets.gateway_api_key().ok_or(Error::NotConfigured)?;
        Self::new(config, api_key)
    }

    async fn send(&self, body: &serde_json::Value) -> Result<reqwest::Response> {
        let url = self.config.completions_url();
        let mut attempt = 0;

        loop {
            let result = self
                .http
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(body)
                .send()
                .await;

            match result {
                Ok(response) => return Ok(response),
                Err(e) if is_transient(&e) && attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(
                        attempt,
                        max_retries = self.config.max_retries,
                        error = %e,
                        "Transient gateway failure, retrying"
                    );
                    tokio::time::sleep(self.config.retry_backoff).await;
                }
                Err(e) => return Err(Error::Http(e)),
            }
        }
    }
}

/// Only transport failures are retried; HTTP statuses always surface
fn is_transient(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout()
}

#[async_trait]
impl ChatGateway for GatewayClient {
    async fn call_tool(&self, request: &ToolRequest) -> Result<ToolCall> {
        let body = request.to_body(&self.config.model);

        debug!(tool = request.tool.name, model = %self.config.model, "Calling gateway");

        let response = self.send(&body).await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %text, "AI gateway error");
            return Err(Error::from_status(status.as_u16(), text));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::MalformedUpstreamPayload(format!("completion body: {}", e)))?;

        completion
            .into_first_tool_call()
            .ok_or(Error::MissingToolCall)
    }
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("url", &self.config.completions_url())
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

fn expect_tool(call: &ToolCall, name: &str) -> Result<()> {
    if call.name != name {
        return Err(Error::MalformedUpstreamPayload(format!(
            "expected {} tool call, got {}",
            name, call.name
        )));
    }
    Ok(())
}

/// Run a code review through the gateway
pub async fn suggest_review(
    gateway: &dyn ChatGateway,
    request: &ReviewRequest,
) -> Result<ReviewPayload> {
    let call = gateway.call_tool(&ToolRequest::review(request)).await?;
    expect_tool(&call, SUGGEST_REVIEW)?;
    call.decode()
}

/// Generate test cases through the gateway
pub async fn generate_tests(gateway: &dyn ChatGateway, request: &TestRequest) -> Result<TestSuite> {
    let call = gateway.call_tool(&ToolRequest::tests(request)).await?;
    expect_tool(&call, GENERATE_TESTS)?;
    call.decode()
}
