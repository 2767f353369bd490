//! The outbound completion call: prompt in, generated text out.

use serde_json::json;
use thiserror::Error;
use tracing::warn;

use redacta_core::RelayConfig;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure: connect error, timeout, malformed response body.
    #[error("completion request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("completion endpoint returned HTTP {status}")]
    Status { status: u16, detail: String },

    /// A 2xx response with no text segment where one belongs.
    #[error("completion response carried no text content")]
    EmptyCompletion,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Transport(err.to_string())
    }
}

/// A remote text-completion service. One call per request — no retries and
/// no streaming; a failure is terminal for the request that made it.
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Anthropic Messages API client.
pub struct AnthropicProvider {
    http: reqwest::Client,
    config: RelayConfig,
}

impl AnthropicProvider {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait::async_trait]
impl CompletionProvider for AnthropicProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/v1/messages", self.config.base_url);
        let body = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let resp = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .timeout(self.config.timeout)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %detail, "provider returned error status");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        let payload: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        Ok(extract_text(&payload)?.to_string())
    }
}

/// Pull the first generated text segment out of a Messages API response:
/// `{ "content": [ { "type": "text", "text": ... } ] }`. A 2xx response
/// without that segment is an upstream failure, not an empty success.
fn extract_text(payload: &serde_json::Value) -> Result<&str, ProviderError> {
    payload["content"][0]["text"]
        .as_str()
        .ok_or(ProviderError::EmptyCompletion)
}
