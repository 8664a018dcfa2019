//! Private-chat command handlers.

use sqlx::SqlitePool;

use telegram_api::Message;

use crate::error::BotError;
use crate::handlers::ledger_user;
use crate::texts;
use crate::transport::ChatTransport;
use crate::view;

/// `/start`: register or update the caller and send the usage text.
pub async fn start<T: ChatTransport>(
    pool: &SqlitePool,
    transport: &T,
    message: &Message,
) -> Result<(), BotError> {
    if let Some(from) = &message.from {
        ledger::user::upsert_user(pool, &ledger_user(from)).await?;
    }
    transport
        .send_message(message.chat.id, texts::START, None)
        .await?;
    Ok(())
}

/// `/example`: show the expected input format.
pub async fn example<T: ChatTransport>(
    transport: &T,
    message: &Message,
) -> Result<(), BotError> {
    transport
        .send_message(message.chat.id, texts::EXAMPLE, None)
        .await?;
    Ok(())
}

/// `/getgroups`: list the caller's discovered group memberships.
pub async fn get_groups<T: ChatTransport>(
    pool: &SqlitePool,
    transport: &T,
    message: &Message,
) -> Result<(), BotError> {
    let Some(from) = &message.from else {
        return Ok(());
    };

    let groups = ledger::user::user_groups(pool, from.id).await?;
    let reply = if groups.is_empty() {
        texts::GETGROUPS_NONE.to_string()
    } else {
        let names: Vec<&str> = groups.iter().map(|g| g.group_name.as_str()).collect();
        format!("{}{}", texts::GETGROUPS_HEADER, names.join("\n"))
    };

    transport.send_message(message.chat.id, &reply, None).await?;
    Ok(())
}

/// `/show`: render every list the caller owns.
pub async fn show<T: ChatTransport>(
    pool: &SqlitePool,
    transport: &T,
    message: &Message,
) -> Result<(), BotError> {
    let Some(from) = &message.from else {
        return Ok(());
    };

    let lists = ledger::debt_list::lists_owned_by(pool, from.id).await?;
    let reply = if lists.is_empty() {
        texts::NO_DEBT_LISTS.to_string()
    } else {
        let mut rendered = Vec::with_capacity(lists.len());
        for list in &lists {
            rendered.push(view::render_list(pool, list.list_id).await?);
        }
        format!("{}{}", texts::SHOW_HEADER, rendered.join(texts::SHOW_SEPARATOR))
    };

    transport.send_message(message.chat.id, &reply, None).await?;
    Ok(())
}

/// `/clear`: ask for confirmation before deleting everything.
pub async fn clear<T: ChatTransport>(
    transport: &T,
    message: &Message,
) -> Result<(), BotError> {
    transport
        .send_message(
            message.chat.id,
            texts::CLEAR_PROMPT,
            Some(view::clear_keyboard()),
        )
        .await?;
    Ok(())
}

/// `/help`: list the available commands.
pub async fn help<T: ChatTransport>(transport: &T, message: &Message) -> Result<(), BotError> {
    transport
        .send_message(message.chat.id, texts::HELP, None)
        .await?;
    Ok(())
}

/// Fallback for unrecognized commands.
pub async fn unknown<T: ChatTransport>(transport: &T, message: &Message) -> Result<(), BotError> {
    transport
        .send_message(message.chat.id, texts::UNKNOWN_COMMAND, None)
        .await?;
    Ok(())
}
