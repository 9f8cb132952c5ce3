//! Claude client implementation

use async_trait::async_trait;
use reqwest::Client;

use crate::llm::core::{
    error::LlmError,
    provider::LlmProvider,
    types::{GenerateRequest, GenerateResponse},
};

use super::mapper::{from_claude_response, to_claude_request};
use super::types::{ClaudeErrorResponse, MessagesResponse};

/// Public Anthropic API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Value sent in the `anthropic-version` header
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude model identifiers for the Anthropic API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaudeModel {
    /// Claude 3.5 Sonnet (2024-10-22)
    Sonnet35,
}

impl ClaudeModel {
    /// Get the model identifier string
    pub fn as_str(&self) -> &str {
        match self {
            ClaudeModel::Sonnet35 => "claude-3-5-sonnet-20241022",
        }
    }
}

/// Client for the Anthropic Messages API
pub struct ClaudeClient {
    /// HTTP client for making requests
    http_client: Client,
    /// API key; `None` means every call fails with an authentication error
    api_key: Option<String>,
    /// Base URL without trailing slash
    base_url: String,
}

impl ClaudeClient {
    /// Create a new Claude client
    ///
    /// # Arguments
    ///
    /// * `api_key` - Anthropic API key, if configured
    /// * `base_url` - API base URL (e.g., "https://api.anthropic.com")
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Result<Self, LlmError> {
        let http_client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()
            .map_err(|e| LlmError::HttpError {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Build the endpoint URL for the Messages API
    fn build_endpoint_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    async fn make_request(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            LlmError::AuthenticationError("CLAUDE_API_KEY is not set".to_string())
        })?;

        let claude_request = to_claude_request(request);

        let url = self.build_endpoint_url();
        let response = self
            .http_client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&claude_request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), body));
        }

        let parsed: MessagesResponse = serde_json::from_str(&body)?;
        tracing::debug!(
            id = %parsed.id,
            model = %parsed.model,
            stop_reason = ?parsed.stop_reason,
            "claude response received"
        );
        Ok(from_claude_response(parsed))
    }
}

/// Prefer the structured error envelope; fall back to the raw body
fn error_from_body(status: u16, body: String) -> LlmError {
    match serde_json::from_str::<ClaudeErrorResponse>(&body) {
        Ok(envelope) => LlmError::ProviderError {
            code: envelope.error.error_type,
            message: envelope.error.message,
        },
        Err(_) => LlmError::HttpError { status, body },
    }
}

#[async_trait]
impl LlmProvider for ClaudeClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        self.make_request(request).await
    }
}
