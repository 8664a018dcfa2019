//! Ledger models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user observed by the bot, identified by their platform id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Platform-assigned numeric id (stable).
    pub user_id: i64,
    /// Handle without the "@" prefix. Not every account has one.
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// A group chat the bot has seen activity in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Group {
    /// Platform-assigned numeric id.
    pub group_id: i64,
    pub group_name: String,
    /// "private", "group", "supergroup", or "channel". Informational only.
    pub group_type: String,
}

/// A named debt list owned by one user, optionally routed to one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DebtList {
    /// Ledger-assigned sequential id.
    pub list_id: i64,
    /// Owner.
    pub user_id: i64,
    /// Destination group; NULL until routed.
    pub group_id: Option<i64>,
    pub debt_name: String,
    /// Payee phone number, digits only.
    pub phone_number: String,
    /// True until the owner confirms the list.
    pub is_pending: bool,
    /// Chat holding the currently posted message, if any.
    pub chat_id: Option<i64>,
    /// Posted message id; NULL together with `chat_id`.
    pub message_id: Option<i64>,
    /// UTC instant of the last child-debt change.
    pub last_updated: DateTime<Utc>,
}

impl DebtList {
    /// The posted message location, when one is recorded.
    pub fn message_location(&self) -> Option<(i64, i64)> {
        self.chat_id.zip(self.message_id)
    }
}

/// One participant's share of a debt list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Debt {
    pub debt_id: i64,
    pub list_id: i64,
    /// Debtor handle without the "@" prefix.
    pub owed_by: String,
    /// Fixed-point amount in integer cents.
    pub amount_cents: i64,
    pub paid: bool,
}

/// A debt entry to insert alongside a new list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDebt {
    pub owed_by: String,
    pub amount_cents: i64,
}
