//! Periodic refresh of stale posted lists.

use std::time::Duration;

use chrono::Utc;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use ledger::models::DebtList;
use ledger::Database;

use crate::error::BotError;
use crate::transport::ChatTransport;
use crate::view;

/// Re-posts group messages for lists that have gone stale.
///
/// Old inline buttons become unreachable once a message scrolls out of
/// view, so the refresher replaces rather than edits: delete the old
/// message (best-effort) and post a fresh copy at the same group. The
/// list's `last_updated` reflects content changes only and is not touched
/// by a repost.
pub struct ListRefresher<T: ChatTransport> {
    db: Database,
    transport: T,
    staleness: Duration,
}

impl<T: ChatTransport> ListRefresher<T> {
    pub fn new(db: Database, transport: T, staleness: Duration) -> Self {
        Self {
            db,
            transport,
            staleness,
        }
    }

    /// Walk all posted lists once, refreshing the stale ones.
    ///
    /// Per-list failures are logged and the walk continues; only the
    /// initial query can fail the tick.
    pub async fn tick(&self) -> Result<(), BotError> {
        let lists = ledger::debt_list::posted_lists(self.db.pool()).await?;
        let now = Utc::now();

        for list in lists {
            let age = now.signed_duration_since(list.last_updated);
            let stale = age
                .to_std()
                .map(|age| age >= self.staleness)
                .unwrap_or(false);
            if !stale {
                continue;
            }

            if let Err(reason) = self.refresh_list(&list).await {
                warn!(list_id = list.list_id, %reason, "failed to refresh debt list");
            }
        }

        Ok(())
    }

    /// Replace one list's posted message with a fresh copy.
    async fn refresh_list(&self, list: &DebtList) -> Result<(), BotError> {
        let Some((chat_id, message_id)) = list.message_location() else {
            return Ok(());
        };

        match self.transport.delete_message(chat_id, message_id).await {
            Ok(true) => debug!(list_id = list.list_id, "deleted stale message"),
            Ok(false) => debug!(list_id = list.list_id, "stale message already gone"),
            // Bookkeeping cleanup still proceeds below.
            Err(reason) => warn!(list_id = list.list_id, %reason, "failed to delete stale message"),
        }

        ledger::debt_list::clear_message_location(self.db.pool(), list.list_id).await?;

        let text = view::render_list(self.db.pool(), list.list_id).await?;
        let new_message_id = self
            .transport
            .send_message(chat_id, &text, Some(view::pay_unpay_keyboard(list.list_id)))
            .await?;

        ledger::debt_list::set_message_location(
            self.db.pool(),
            list.list_id,
            chat_id,
            new_message_id,
        )
        .await?;

        info!(
            list_id = list.list_id,
            chat_id, new_message_id, "reposted stale debt list"
        );
        Ok(())
    }

    /// Drive [`tick`](Self::tick) on a fixed interval, forever.
    pub async fn run(&self, period: Duration) {
        let mut timer = interval(period);
        info!(?period, staleness = ?self.staleness, "Starting list refresher");

        loop {
            timer.tick().await;
            if let Err(reason) = self.tick().await {
                error!(%reason, "refresh tick failed");
            }
        }
    }
}
