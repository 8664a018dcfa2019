//! Long-poll update stream.

use std::time::Duration;

use tracing::debug;

use crate::client::BotClient;
use crate::error::TelegramError;
use crate::types::{GetUpdatesParams, Update};

/// Configuration for long polling.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// How long the server holds an empty getUpdates call open.
    pub timeout: Duration,
    /// Maximum updates per batch (1-100).
    pub limit: i64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            limit: 100,
        }
    }
}

/// Polls getUpdates and tracks the acknowledgement offset.
///
/// Each successful batch advances the offset past the last update seen, so
/// the server drops those updates on the next call.
pub struct UpdatePoller {
    client: BotClient,
    config: PollConfig,
    offset: Option<i64>,
}

impl UpdatePoller {
    /// Create a poller with default configuration.
    pub fn new(client: BotClient) -> Self {
        Self::with_config(client, PollConfig::default())
    }

    /// Create a poller with custom configuration.
    pub fn with_config(client: BotClient, config: PollConfig) -> Self {
        Self {
            client,
            config,
            offset: None,
        }
    }

    /// The next offset that will be sent to the server.
    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// Fetch the next batch of updates, blocking up to the poll timeout.
    ///
    /// Returns an empty batch when the long poll expires without traffic.
    pub async fn next_batch(&mut self) -> Result<Vec<Update>, TelegramError> {
        let params = GetUpdatesParams {
            offset: self.offset,
            limit: Some(self.config.limit),
            timeout: Some(self.config.timeout.as_secs()),
            allowed_updates: Some(vec![
                "message".to_string(),
                "callback_query".to_string(),
            ]),
        };

        let updates = self.client.get_updates(&params).await?;

        if let Some(last) = updates.last() {
            self.offset = Some(last.update_id + 1);
            debug!(
                "Received {} update(s), next offset {}",
                updates.len(),
                last.update_id + 1
            );
        }

        Ok(updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_poll_config() {
        let config = PollConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.limit, 100);
    }
}
