//! Update handlers: commands, free-text messages, and callback queries.

pub mod callbacks;
pub mod commands;
pub mod messages;

use ledger::models::User;
use telegram_api::TgUser;

/// Convert a platform user into a ledger row.
pub(crate) fn ledger_user(user: &TgUser) -> User {
    User {
        user_id: user.id,
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
    }
}
