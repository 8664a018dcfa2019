//! Request and response types for the Bot API.

mod markup;
mod params;
mod update;

pub use markup::{InlineKeyboardButton, InlineKeyboardMarkup};
pub use params::{
    AnswerCallbackQueryParams, DeleteMessageParams, EditMessageTextParams, GetUpdatesParams,
    SendMessageParams,
};
pub use update::{CallbackQuery, Chat, Message, TgUser, Update};
