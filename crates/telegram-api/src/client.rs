//! Telegram Bot API HTTP client.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ApiConfig;
use crate::error::TelegramError;
use crate::types::{
    AnswerCallbackQueryParams, DeleteMessageParams, EditMessageTextParams, GetUpdatesParams,
    Message, SendMessageParams, TgUser, Update,
};

/// Response envelope returned by every Bot API method.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    error_code: Option<i64>,
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct NoParams {}

/// Client for communicating with the Telegram Bot API.
#[derive(Clone)]
pub struct BotClient {
    http: Client,
    config: ApiConfig,
    connected: Arc<AtomicBool>,
}

impl BotClient {
    /// Connect to the Bot API and verify the token with a getMe call.
    pub async fn connect(config: ApiConfig) -> Result<Self, TelegramError> {
        // Timeout must exceed the longest getUpdates long poll.
        let http = Client::builder()
            .timeout(Duration::from_secs(90))
            .build()
            .map_err(TelegramError::Http)?;

        let client = Self {
            http,
            config,
            connected: Arc::new(AtomicBool::new(false)),
        };

        let me = client.get_me().await?;
        client.connected.store(true, Ordering::SeqCst);
        info!(
            "Connected to Telegram Bot API as @{}",
            me.username.as_deref().unwrap_or("<unnamed>")
        );

        Ok(client)
    }

    /// Check if the connect-time health check succeeded.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Call a Bot API method and decode its response envelope.
    async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: &P,
    ) -> Result<R, TelegramError> {
        let url = self.config.method_url(method);
        debug!("Calling {}", method);

        let resp = self.http.post(&url).json(params).send().await?;
        let body: ApiResponse<R> = resp.json().await?;

        if body.ok {
            body.result
                .ok_or_else(|| TelegramError::EmptyResult(method.to_string()))
        } else {
            Err(TelegramError::Api {
                error_code: body.error_code.unwrap_or(0),
                description: body.description.unwrap_or_default(),
            })
        }
    }

    /// Get information about the bot account.
    pub async fn get_me(&self) -> Result<TgUser, TelegramError> {
        self.call("getMe", &NoParams {}).await
    }

    /// Fetch pending updates via long polling.
    pub async fn get_updates(
        &self,
        params: &GetUpdatesParams,
    ) -> Result<Vec<Update>, TelegramError> {
        self.call("getUpdates", params).await
    }

    /// Send a text message, optionally with an inline keyboard.
    pub async fn send_message(&self, params: &SendMessageParams) -> Result<Message, TelegramError> {
        self.call("sendMessage", params).await
    }

    /// Edit the text (and keyboard) of a previously sent message.
    pub async fn edit_message_text(
        &self,
        params: &EditMessageTextParams,
    ) -> Result<(), TelegramError> {
        // The API returns the edited Message (or `true` for inline messages);
        // the caller only needs success.
        let _: serde_json::Value = self.call("editMessageText", params).await?;
        Ok(())
    }

    /// Delete a message.
    pub async fn delete_message(&self, params: &DeleteMessageParams) -> Result<(), TelegramError> {
        let _: bool = self.call("deleteMessage", params).await?;
        Ok(())
    }

    /// Answer a callback query, stopping the button's loading spinner.
    pub async fn answer_callback_query(
        &self,
        params: &AnswerCallbackQueryParams,
    ) -> Result<(), TelegramError> {
        let _: bool = self.call("answerCallbackQuery", params).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_decodes_success() {
        let json = r#"{"ok":true,"result":{"id":1,"is_bot":true,"first_name":"DebtBot","username":"debt_bot"}}"#;
        let resp: ApiResponse<TgUser> = serde_json::from_str(json).unwrap();
        assert!(resp.ok);
        assert_eq!(resp.result.unwrap().username.as_deref(), Some("debt_bot"));
    }

    #[test]
    fn test_envelope_decodes_error() {
        let json = r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#;
        let resp: ApiResponse<TgUser> = serde_json::from_str(json).unwrap();
        assert!(!resp.ok);
        assert_eq!(resp.error_code, Some(401));
        assert_eq!(resp.description.as_deref(), Some("Unauthorized"));
    }
}
