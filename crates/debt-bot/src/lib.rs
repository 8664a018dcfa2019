//! Telegram bot for tracking and settling group debts.
//!
//! A user sends the bot a debt list in a private chat, confirms it via an
//! inline button, and routes it to one of their groups. Group members then
//! settle their own shares with pay/unpay buttons, and a periodic refresher
//! re-posts lists whose group message has gone stale.
//!
//! The crate wires three collaborators together:
//!
//! - `telegram-api` for the chat transport (behind [`ChatTransport`])
//! - `ledger` for persistence
//! - `tracker-core` for parsing, callback actions, and rendering

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod refresher;
pub mod texts;
pub mod transport;
pub mod view;

pub use config::BotConfig;
pub use dispatcher::Dispatcher;
pub use error::BotError;
pub use refresher::ListRefresher;
pub use transport::{ChatTransport, RecordingTransport, TelegramTransport, TransportError};
