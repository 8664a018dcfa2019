//! Rust client for the Telegram Bot API.
//!
//! This crate wraps the subset of the Bot API the debt tracker needs:
//! sending, editing and deleting messages, answering callback queries, and
//! receiving updates via long polling.
//!
//! # Example
//!
//! ```no_run
//! use telegram_api::{ApiConfig, BotClient, SendMessageParams, UpdatePoller};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BotClient::connect(ApiConfig::new("123456:ABC-DEF")).await?;
//!
//!     client
//!         .send_message(&SendMessageParams::new(42, "hello"))
//!         .await?;
//!
//!     let mut poller = UpdatePoller::new(client);
//!     loop {
//!         for update in poller.next_batch().await? {
//!             println!("{:?}", update);
//!         }
//!     }
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod poll;
pub mod types;

pub use client::BotClient;
pub use config::ApiConfig;
pub use error::TelegramError;
pub use poll::{PollConfig, UpdatePoller};
pub use types::{
    CallbackQuery, Chat, DeleteMessageParams, EditMessageTextParams, GetUpdatesParams,
    InlineKeyboardButton, InlineKeyboardMarkup, Message, SendMessageParams, TgUser, Update,
};
