//! Free-text message handlers.

use sqlx::SqlitePool;
use tracing::{debug, info};

use ledger::models::{Group, NewDebt};
use telegram_api::Message;
use tracker_core::parse_debt_list;

use crate::error::BotError;
use crate::handlers::ledger_user;
use crate::transport::ChatTransport;
use crate::view;

/// A private text message: parse it as a debt list draft.
///
/// A rejected draft gets a corrective reply naming the problem; a valid one
/// is persisted in the pending state and echoed back with a confirm button.
pub async fn debt_input<T: ChatTransport>(
    pool: &SqlitePool,
    transport: &T,
    message: &Message,
) -> Result<(), BotError> {
    let (Some(from), Some(text)) = (&message.from, message.text.as_deref()) else {
        return Ok(());
    };

    let draft = match parse_debt_list(text) {
        Ok(draft) => draft,
        Err(reason) => {
            debug!(user_id = from.id, %reason, "rejected debt list input");
            transport
                .send_message(message.chat.id, &reason.to_string(), None)
                .await?;
            return Ok(());
        }
    };

    // The owner may never have sent /start; make sure their row exists
    // before the list references it.
    ledger::user::upsert_user(pool, &ledger_user(from)).await?;

    let entries: Vec<NewDebt> = draft
        .entries
        .iter()
        .map(|entry| NewDebt {
            owed_by: entry.identity.clone(),
            amount_cents: entry.amount.cents(),
        })
        .collect();

    let list_id = ledger::debt_list::create_debt_list(
        pool,
        from.id,
        &draft.debt_name,
        &draft.phone_number,
        &entries,
    )
    .await?;

    info!(user_id = from.id, list_id, "created pending debt list");

    transport
        .send_message(
            message.chat.id,
            &view::draft_summary(&draft),
            Some(view::confirm_keyboard(list_id)),
        )
        .await?;

    Ok(())
}

/// Any message seen in a group chat: discover membership.
///
/// The sender, the group, and the association are all upserted so the
/// routing step can offer this group later.
pub async fn group_activity(pool: &SqlitePool, message: &Message) -> Result<(), BotError> {
    let Some(from) = &message.from else {
        return Ok(());
    };

    if ledger::user::is_user_in_group(pool, from.id, message.chat.id).await? {
        return Ok(());
    }

    ledger::user::upsert_user(pool, &ledger_user(from)).await?;
    ledger::group::upsert_group(
        pool,
        &Group {
            group_id: message.chat.id,
            group_name: message.chat.title.clone().unwrap_or_default(),
            group_type: message.chat.kind.clone(),
        },
    )
    .await?;
    ledger::user::associate_user_with_group(pool, from.id, message.chat.id).await?;

    debug!(
        user_id = from.id,
        group_id = message.chat.id,
        "discovered group membership"
    );

    Ok(())
}
