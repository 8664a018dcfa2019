//! Core types for the debt tracker.
//!
//! This crate holds the pure domain pieces shared by the bot and its tests:
//!
//! - [`Amount`] - fixed-point money amounts (two decimal places)
//! - [`parse_debt_list`] - free-text input parsing into a [`DebtDraft`]
//! - [`Action`] - typed inline-button callback payloads
//! - [`render_debt_list`] - canonical rendering of a list's state
//!
//! Everything here is side-effect free; persistence and transport live in
//! the `ledger` and `debt-bot` crates.

mod action;
mod amount;
mod parse;
mod render;

pub use action::{Action, ActionError};
pub use amount::{Amount, AmountParseError};
pub use parse::{parse_debt_list, DebtDraft, DraftEntry, ParseError};
pub use render::{render_debt_list, EntryLine, ListSnapshot};
