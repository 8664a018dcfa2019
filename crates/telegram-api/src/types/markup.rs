//! Inline keyboard markup.

use serde::Serialize;

/// An inline keyboard attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    /// Build a keyboard from rows of buttons.
    pub fn new(rows: Vec<Vec<InlineKeyboardButton>>) -> Self {
        Self {
            inline_keyboard: rows,
        }
    }

    /// Build a keyboard with a single button.
    pub fn single(button: InlineKeyboardButton) -> Self {
        Self::new(vec![vec![button]])
    }

    /// Build a keyboard with one button per row.
    pub fn column(buttons: Vec<InlineKeyboardButton>) -> Self {
        Self::new(buttons.into_iter().map(|b| vec![b]).collect())
    }

    /// Iterate over all callback payloads in the keyboard, row by row.
    pub fn callback_data(&self) -> impl Iterator<Item = &str> {
        self.inline_keyboard
            .iter()
            .flatten()
            .map(|b| b.callback_data.as_str())
    }
}

/// A single inline keyboard button carrying a callback payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineKeyboardButton {
    /// Create a button that triggers a callback query when pressed.
    pub fn callback(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_markup() {
        let markup = InlineKeyboardMarkup::new(vec![vec![
            InlineKeyboardButton::callback("✅", "pay:3"),
            InlineKeyboardButton::callback("❌", "unpay:3"),
        ]]);
        let json = serde_json::to_string(&markup).unwrap();
        assert_eq!(
            json,
            r#"{"inline_keyboard":[[{"text":"✅","callback_data":"pay:3"},{"text":"❌","callback_data":"unpay:3"}]]}"#
        );
    }

    #[test]
    fn test_column_layout() {
        let markup = InlineKeyboardMarkup::column(vec![
            InlineKeyboardButton::callback("A", "a"),
            InlineKeyboardButton::callback("B", "b"),
        ]);
        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(markup.inline_keyboard[0].len(), 1);
        let data: Vec<_> = markup.callback_data().collect();
        assert_eq!(data, vec!["a", "b"]);
    }
}
