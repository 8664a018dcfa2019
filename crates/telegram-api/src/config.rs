//! Configuration types for the Bot API client.

/// Configuration for connecting to the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the Bot API server (e.g., "https://api.telegram.org").
    pub base_url: String,
    /// Bot token issued by @BotFather.
    pub token: String,
}

impl ApiConfig {
    /// Create a new configuration for the public Bot API server.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.telegram.org".to_string(),
            token: token.into(),
        }
    }

    /// Create a configuration against a self-hosted Bot API server.
    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Get the URL for a Bot API method.
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }
}
