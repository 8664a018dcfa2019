//! Incoming update types.

use serde::Deserialize;

/// An incoming update delivered by getUpdates.
///
/// Only the update kinds the bot consumes are modeled; anything else
/// deserializes with both payload fields empty and is skipped upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonically increasing update identifier.
    pub update_id: i64,
    /// New incoming message (command, free text, or group chatter).
    #[serde(default)]
    pub message: Option<Message>,
    /// Inline keyboard button press.
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

/// A message in a private or group chat.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    /// Sender. Absent for channel posts and some service messages.
    #[serde(default)]
    pub from: Option<TgUser>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

/// A chat the bot participates in.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    /// "private", "group", "supergroup", or "channel".
    #[serde(rename = "type")]
    pub kind: String,
    /// Title, for group chats and channels.
    #[serde(default)]
    pub title: Option<String>,
}

impl Chat {
    /// Whether this is a one-on-one chat with the bot.
    pub fn is_private(&self) -> bool {
        self.kind == "private"
    }
}

/// A Telegram user.
#[derive(Debug, Clone, Deserialize)]
pub struct TgUser {
    pub id: i64,
    /// Handle, without the "@" prefix. Not every account has one.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// An inline keyboard button press.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: TgUser,
    /// The message the pressed button was attached to.
    #[serde(default)]
    pub message: Option<Message>,
    /// Opaque payload set when the button was created.
    #[serde(default)]
    pub data: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_message_update() {
        let json = r#"{
            "update_id": 10001,
            "message": {
                "message_id": 7,
                "from": {"id": 42, "is_bot": false, "first_name": "Alice", "username": "alice"},
                "chat": {"id": 42, "type": "private", "first_name": "Alice"},
                "date": 1700000000,
                "text": "/start"
            }
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.update_id, 10001);
        let msg = update.message.unwrap();
        assert_eq!(msg.text.as_deref(), Some("/start"));
        assert!(msg.chat.is_private());
        assert_eq!(msg.from.unwrap().username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_deserialize_callback_update() {
        let json = r#"{
            "update_id": 10002,
            "callback_query": {
                "id": "4382abc",
                "from": {"id": 99, "is_bot": false, "first_name": "Bob", "username": "bob"},
                "message": {
                    "message_id": 55,
                    "chat": {"id": -100123, "type": "supergroup", "title": "Lunch Crew"},
                    "date": 1700000000,
                    "text": "Lunch"
                },
                "chat_instance": "-57",
                "data": "pay:3"
            }
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        let query = update.callback_query.unwrap();
        assert_eq!(query.data.as_deref(), Some("pay:3"));
        let msg = query.message.unwrap();
        assert!(!msg.chat.is_private());
        assert_eq!(msg.chat.title.as_deref(), Some("Lunch Crew"));
    }

    #[test]
    fn test_deserialize_unknown_update_kind() {
        // e.g. an edited_message update: both modeled payloads stay empty
        let json = r#"{"update_id": 10003, "edited_message": {"message_id": 1, "chat": {"id": 5, "type": "private"}, "date": 1700000000}}"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert!(update.message.is_none());
        assert!(update.callback_query.is_none());
    }
}
