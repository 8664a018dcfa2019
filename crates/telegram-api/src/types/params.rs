//! Parameter structs for outgoing Bot API calls.

use serde::Serialize;

use super::markup::InlineKeyboardMarkup;

/// Parameters for getUpdates (long polling).
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetUpdatesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Long-poll timeout in seconds. 0 means short polling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_updates: Option<Vec<String>>,
}

/// Parameters for sendMessage.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageParams {
    pub chat_id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl SendMessageParams {
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            reply_markup: None,
        }
    }

    /// Attach an inline keyboard to the message.
    pub fn with_markup(mut self, markup: InlineKeyboardMarkup) -> Self {
        self.reply_markup = Some(markup);
        self
    }
}

/// Parameters for editMessageText.
#[derive(Debug, Clone, Serialize)]
pub struct EditMessageTextParams {
    pub chat_id: i64,
    pub message_id: i64,
    pub text: String,
    /// Omitting the markup removes any keyboard from the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl EditMessageTextParams {
    pub fn new(chat_id: i64, message_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            message_id,
            text: text.into(),
            reply_markup: None,
        }
    }

    /// Attach an inline keyboard to the edited message.
    pub fn with_markup(mut self, markup: InlineKeyboardMarkup) -> Self {
        self.reply_markup = Some(markup);
        self
    }
}

/// Parameters for deleteMessage.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteMessageParams {
    pub chat_id: i64,
    pub message_id: i64,
}

/// Parameters for answerCallbackQuery.
///
/// Answering stops the loading spinner on the pressed button.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerCallbackQueryParams {
    pub callback_query_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl AnswerCallbackQueryParams {
    pub fn new(callback_query_id: impl Into<String>) -> Self {
        Self {
            callback_query_id: callback_query_id.into(),
            text: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InlineKeyboardButton;

    #[test]
    fn test_send_message_params_minimal() {
        let params = SendMessageParams::new(42, "hello");
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"chat_id":42,"text":"hello"}"#);
    }

    #[test]
    fn test_send_message_params_with_markup() {
        let params = SendMessageParams::new(42, "hello")
            .with_markup(InlineKeyboardMarkup::single(InlineKeyboardButton::callback(
                "Confirm ✅",
                "confirmInput:3",
            )));
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains(r#""callback_data":"confirmInput:3""#));
    }

    #[test]
    fn test_get_updates_params_skips_unset_fields() {
        let params = GetUpdatesParams {
            offset: Some(7),
            timeout: Some(30),
            ..Default::default()
        };
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"offset":7,"timeout":30}"#);
    }
}
