//! Chat transport trait and implementations.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use telegram_api::types::AnswerCallbackQueryParams;
use telegram_api::{
    BotClient, DeleteMessageParams, EditMessageTextParams, InlineKeyboardMarkup,
    SendMessageParams,
};

/// Errors from the chat transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("send failed: {0}")]
    Send(String),

    #[error("edit failed: {0}")]
    Edit(String),

    #[error("delete failed: {0}")]
    Delete(String),

    #[error("callback answer failed: {0}")]
    Answer(String),
}

/// Trait for the messaging operations the bot consumes.
///
/// Abstracted to support different transports (Telegram, tests).
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send a text message, optionally with an inline keyboard.
    ///
    /// Returns the id of the sent message.
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<i64, TransportError>;

    /// Replace a message's text and keyboard in place.
    ///
    /// `None` for the keyboard removes any existing one. Re-issuing an
    /// identical edit (a replayed callback) is not an error.
    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), TransportError>;

    /// Delete a message.
    ///
    /// Returns false when the message was already gone, which callers treat
    /// as success.
    async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<bool, TransportError>;

    /// Answer a callback query, stopping the button's loading spinner.
    async fn answer_callback(&self, callback_id: &str) -> Result<(), TransportError>;
}

/// Production transport backed by the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramTransport {
    client: BotClient,
}

impl TelegramTransport {
    pub fn new(client: BotClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<i64, TransportError> {
        let mut params = SendMessageParams::new(chat_id, text);
        if let Some(markup) = keyboard {
            params = params.with_markup(markup);
        }
        let message = self
            .client
            .send_message(&params)
            .await
            .map_err(|e| TransportError::Send(e.to_string()))?;
        Ok(message.message_id)
    }

    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), TransportError> {
        let mut params = EditMessageTextParams::new(chat_id, message_id, text);
        if let Some(markup) = keyboard {
            params = params.with_markup(markup);
        }
        match self.client.edit_message_text(&params).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_message_not_modified() => Ok(()),
            Err(e) => Err(TransportError::Edit(e.to_string())),
        }
    }

    async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<bool, TransportError> {
        let params = DeleteMessageParams {
            chat_id,
            message_id,
        };
        match self.client.delete_message(&params).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_message_not_found() => Ok(false),
            Err(e) => Err(TransportError::Delete(e.to_string())),
        }
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), TransportError> {
        self.client
            .answer_callback_query(&AnswerCallbackQueryParams::new(callback_id))
            .await
            .map_err(|e| TransportError::Answer(e.to_string()))
    }
}

/// A message captured by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub chat_id: i64,
    pub message_id: i64,
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

#[derive(Debug, Default)]
struct RecordingState {
    sent: Vec<OutgoingMessage>,
    edits: Vec<OutgoingMessage>,
    deleted: Vec<(i64, i64)>,
    answered: Vec<String>,
    missing: HashSet<(i64, i64)>,
    next_message_id: i64,
}

/// An in-memory transport for tests that records every operation.
#[derive(Debug)]
pub struct RecordingTransport {
    state: Mutex<RecordingState>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RecordingState {
                next_message_id: 1000,
                ..Default::default()
            }),
        }
    }

    /// All messages sent so far, in order.
    pub fn sent(&self) -> Vec<OutgoingMessage> {
        self.state.lock().unwrap().sent.clone()
    }

    /// Messages sent to one chat, in order.
    pub fn sent_to(&self, chat_id: i64) -> Vec<OutgoingMessage> {
        self.sent()
            .into_iter()
            .filter(|m| m.chat_id == chat_id)
            .collect()
    }

    /// The most recent message sent to one chat.
    pub fn last_sent_to(&self, chat_id: i64) -> Option<OutgoingMessage> {
        self.sent_to(chat_id).pop()
    }

    /// All edits applied so far, in order.
    pub fn edits(&self) -> Vec<OutgoingMessage> {
        self.state.lock().unwrap().edits.clone()
    }

    /// All deletions attempted so far.
    pub fn deleted(&self) -> Vec<(i64, i64)> {
        self.state.lock().unwrap().deleted.clone()
    }

    /// Callback query ids answered so far.
    pub fn answered(&self) -> Vec<String> {
        self.state.lock().unwrap().answered.clone()
    }

    /// Make a subsequent delete of this message report "already gone".
    pub fn mark_missing(&self, chat_id: i64, message_id: i64) {
        self.state
            .lock()
            .unwrap()
            .missing
            .insert((chat_id, message_id));
    }
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<i64, TransportError> {
        let mut state = self.state.lock().unwrap();
        let message_id = state.next_message_id;
        state.next_message_id += 1;
        state.sent.push(OutgoingMessage {
            chat_id,
            message_id,
            text: text.to_string(),
            keyboard,
        });
        Ok(message_id)
    }

    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), TransportError> {
        self.state.lock().unwrap().edits.push(OutgoingMessage {
            chat_id,
            message_id,
            text: text.to_string(),
            keyboard,
        });
        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<bool, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.deleted.push((chat_id, message_id));
        Ok(!state.missing.remove(&(chat_id, message_id)))
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), TransportError> {
        self.state
            .lock()
            .unwrap()
            .answered
            .push(callback_id.to_string());
        Ok(())
    }
}
