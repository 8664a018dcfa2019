//! Inline-button callback handlers.

use sqlx::SqlitePool;
use tracing::{debug, warn};

use ledger::LedgerError;
use telegram_api::CallbackQuery;
use tracker_core::Action;

use crate::error::BotError;
use crate::texts;
use crate::transport::ChatTransport;
use crate::view;

/// Decode a callback payload and run the matching transition.
///
/// The payload is untrusted: undecodable data (including buttons from old
/// builds) is logged and dropped rather than failing the update.
pub async fn dispatch<T: ChatTransport>(
    pool: &SqlitePool,
    transport: &T,
    query: &CallbackQuery,
) -> Result<(), BotError> {
    // Stop the button's loading spinner, whatever happens next.
    transport.answer_callback(&query.id).await?;

    let Some(data) = query.data.as_deref() else {
        return Ok(());
    };

    let action = match data.parse::<Action>() {
        Ok(action) => action,
        Err(reason) => {
            debug!(%reason, "ignoring undecodable callback payload");
            return Ok(());
        }
    };

    match action {
        Action::ConfirmInput { list_id } => confirm_input(pool, transport, query, list_id).await,
        Action::SendToGroup { group_id, list_id } => {
            send_to_group(pool, transport, query, group_id, list_id).await
        }
        Action::Pay { list_id } => toggle(pool, transport, query, list_id, true).await,
        Action::Unpay { list_id } => toggle(pool, transport, query, list_id, false).await,
        Action::ConfirmClear => confirm_clear(pool, transport, query).await,
    }
}

/// The chat a flow reply should land in: where the button was, or the
/// actor's private chat when the original message is gone.
fn reply_chat(query: &CallbackQuery) -> i64 {
    query
        .message
        .as_ref()
        .map(|m| m.chat.id)
        .unwrap_or(query.from.id)
}

/// Owner pressed "Confirm" under a draft.
async fn confirm_input<T: ChatTransport>(
    pool: &SqlitePool,
    transport: &T,
    query: &CallbackQuery,
    list_id: i64,
) -> Result<(), BotError> {
    // Without a discovered membership there is nowhere to route; leave the
    // list pending so the owner can confirm again later.
    let groups = ledger::user::user_groups(pool, query.from.id).await?;
    if groups.is_empty() {
        transport
            .send_message(reply_chat(query), texts::NO_GROUPS, None)
            .await?;
        return Ok(());
    }

    match ledger::debt_list::confirm_pending(pool, list_id).await {
        Ok(()) => {}
        Err(LedgerError::NotFound { .. }) => {
            transport
                .send_message(reply_chat(query), texts::CONFIRM_STALE, None)
                .await?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    transport
        .send_message(
            reply_chat(query),
            texts::CHOOSE_GROUP,
            Some(view::group_choice_keyboard(&groups, list_id)),
        )
        .await?;

    // Retire the confirm button: re-edit the draft without its prompt line.
    if let Some(message) = &query.message {
        if let Some(text) = &message.text {
            transport
                .edit_message_text(
                    message.chat.id,
                    message.message_id,
                    view::without_last_line(text),
                    None,
                )
                .await?;
        }
    }

    Ok(())
}

/// Owner picked a destination group for a confirmed list.
async fn send_to_group<T: ChatTransport>(
    pool: &SqlitePool,
    transport: &T,
    query: &CallbackQuery,
    group_id: i64,
    list_id: i64,
) -> Result<(), BotError> {
    let text = match view::render_list(pool, list_id).await {
        Ok(text) => text,
        Err(BotError::Ledger(LedgerError::NotFound { .. })) => {
            transport
                .send_message(reply_chat(query), texts::LIST_GONE, None)
                .await?;
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let message_id = transport
        .send_message(group_id, &text, Some(view::pay_unpay_keyboard(list_id)))
        .await?;

    ledger::debt_list::assign_group(pool, list_id, group_id).await?;
    ledger::debt_list::set_message_location(pool, list_id, group_id, message_id).await?;

    let group = ledger::group::get_group(pool, group_id).await?;
    let note = format!("{}\n\n{}", texts::LIST_SENT, group.group_name);

    // Replace the group chooser with a confirmation for the owner.
    match &query.message {
        Some(message) => {
            transport
                .edit_message_text(message.chat.id, message.message_id, &note, None)
                .await?;
        }
        None => {
            transport
                .send_message(query.from.id, &note, None)
                .await?;
        }
    }

    Ok(())
}

/// A participant pressed pay or unpay under a posted list.
async fn toggle<T: ChatTransport>(
    pool: &SqlitePool,
    transport: &T,
    query: &CallbackQuery,
    list_id: i64,
    paid: bool,
) -> Result<(), BotError> {
    let actor = query.from.id;
    let state = if paid { "paid" } else { "unpaid" };

    // Identity matching is by handle; accounts without one cannot match
    // any entry.
    let Some(identity) = query.from.username.as_deref() else {
        transport
            .send_message(actor, texts::NO_USERNAME, None)
            .await?;
        return Ok(());
    };

    let list = match ledger::debt_list::get_debt_list(pool, list_id).await {
        Ok(list) => list,
        Err(LedgerError::NotFound { .. }) => {
            transport
                .send_message(actor, texts::LIST_GONE, None)
                .await?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    match ledger::debt::set_paid(pool, list_id, identity, paid).await {
        Ok(()) => {}
        Err(LedgerError::NotFound { .. }) => {
            transport
                .send_message(actor, texts::NOT_A_PARTICIPANT, None)
                .await?;
            return Ok(());
        }
        Err(LedgerError::AlreadyInState { .. }) => {
            let reply = format!(
                "You have already marked this debt ({}) as {}.",
                list.debt_name, state
            );
            transport.send_message(actor, &reply, None).await?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    // Re-render the posted message in place, keeping the pay/unpay buttons.
    let rendered = view::render_list(pool, list_id).await?;
    let location = list
        .message_location()
        .or_else(|| query.message.as_ref().map(|m| (m.chat.id, m.message_id)));
    if let Some((chat_id, message_id)) = location {
        if let Err(reason) = transport
            .edit_message_text(
                chat_id,
                message_id,
                &rendered,
                Some(view::pay_unpay_keyboard(list_id)),
            )
            .await
        {
            // The toggle is committed; a lost edit only delays the visual
            // update until the next change or refresh.
            warn!(list_id, %reason, "failed to re-render posted list");
        }
    }

    let ack = format!(
        "You have marked the debt ({}) as {}.",
        list.debt_name, state
    );
    transport.send_message(actor, &ack, None).await?;

    Ok(())
}

/// Owner confirmed the /clear prompt.
async fn confirm_clear<T: ChatTransport>(
    pool: &SqlitePool,
    transport: &T,
    query: &CallbackQuery,
) -> Result<(), BotError> {
    let deleted = ledger::debt_list::delete_lists_owned_by(pool, query.from.id).await?;

    let reply = if deleted > 0 {
        texts::CLEARED
    } else {
        texts::NOTHING_TO_CLEAR
    };
    transport
        .send_message(reply_chat(query), reply, None)
        .await?;

    // Retire the confirm button but keep the prompt text visible.
    if let Some(message) = &query.message {
        if let Some(text) = &message.text {
            transport
                .edit_message_text(message.chat.id, message.message_id, text, None)
                .await?;
        }
    }

    Ok(())
}
