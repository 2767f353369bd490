use std::time::Duration;

/// Completion-provider configuration. Built once at startup and passed into
/// the provider constructor; business code never reads the environment.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Provider API key. Required — the process refuses to serve without it.
    pub api_key: String,
    /// Base URL of the provider endpoint (no trailing slash).
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Completion length cap, in provider tokens.
    pub max_tokens: u32,
    /// Timeout for the outbound call — the only unbounded-latency operation
    /// in the system.
    pub timeout: Duration,
}

impl RelayConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.anthropic.com".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 1000,
            timeout: Duration::from_secs(60),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_provider_defaults() {
        let config = RelayConfig::new("key");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.base_url, "https://api.anthropic.com");
        assert_eq!(config.model, "claude-sonnet-4-20250514");
        assert_eq!(config.max_tokens, 1000);
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn builders_override_each_default() {
        let config = RelayConfig::new("key")
            .with_base_url("https://example.test")
            .with_model("claude-test")
            .with_max_tokens(250)
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "https://example.test");
        assert_eq!(config.model, "claude-test");
        assert_eq!(config.max_tokens, 250);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
