//! Routes incoming updates to handlers and owns the error boundary.

use std::future::Future;
use std::time::Duration;

use tracing::{error, info, warn};

use ledger::Database;
use telegram_api::{Message, Update, UpdatePoller};

use crate::error::BotError;
use crate::handlers::{callbacks, commands, messages};
use crate::texts;
use crate::transport::ChatTransport;

/// Delay before retrying after a failed getUpdates call.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Dispatches updates to the command, message, and callback handlers.
///
/// Every handler error is caught here: logged, and translated into a
/// generic failure reply to the actor. Nothing propagates out of
/// [`handle_update`](Dispatcher::handle_update).
pub struct Dispatcher<T: ChatTransport> {
    db: Database,
    transport: T,
}

impl<T: ChatTransport> Dispatcher<T> {
    pub fn new(db: Database, transport: T) -> Self {
        Self { db, transport }
    }

    /// Get a reference to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Handle a single update, absorbing any error.
    pub async fn handle_update(&self, update: &Update) {
        if let Err(reason) = self.route(update).await {
            warn!(update_id = update.update_id, %reason, "error handling update");
            if let Some(chat_id) = reply_target(update) {
                if let Err(reason) = self
                    .transport
                    .send_message(chat_id, texts::GENERIC_ERROR, None)
                    .await
                {
                    error!(%reason, "failed to deliver error reply");
                }
            }
        }
    }

    async fn route(&self, update: &Update) -> Result<(), BotError> {
        let pool = self.db.pool();

        if let Some(query) = &update.callback_query {
            return callbacks::dispatch(pool, &self.transport, query).await;
        }

        let Some(message) = &update.message else {
            return Ok(());
        };

        if message.chat.is_private() {
            let Some(text) = message.text.as_deref() else {
                return Ok(());
            };
            if let Some(command) = parse_command(text) {
                return self.run_command(&command, message).await;
            }
            return messages::debt_input(pool, &self.transport, message).await;
        }

        // Group chatter only feeds membership discovery.
        messages::group_activity(pool, message).await
    }

    async fn run_command(&self, command: &str, message: &Message) -> Result<(), BotError> {
        let pool = self.db.pool();
        match command {
            "start" => commands::start(pool, &self.transport, message).await,
            "example" => commands::example(&self.transport, message).await,
            "getgroups" => commands::get_groups(pool, &self.transport, message).await,
            "show" => commands::show(pool, &self.transport, message).await,
            "clear" => commands::clear(&self.transport, message).await,
            "help" => commands::help(&self.transport, message).await,
            _ => commands::unknown(&self.transport, message).await,
        }
    }

    /// Poll for updates until the process is stopped.
    pub async fn run(&self, poller: &mut UpdatePoller) {
        info!("Starting update dispatcher");
        loop {
            match poller.next_batch().await {
                Ok(batch) => {
                    for update in batch {
                        self.handle_update(&update).await;
                    }
                }
                Err(reason) => {
                    error!(%reason, "failed to fetch updates");
                    tokio::time::sleep(POLL_RETRY_DELAY).await;
                }
            }
        }
    }

    /// Poll for updates until the shutdown signal completes.
    pub async fn run_with_shutdown<S>(&self, poller: &mut UpdatePoller, shutdown_signal: S)
    where
        S: Future<Output = ()> + Send,
    {
        info!("Starting update dispatcher (graceful shutdown enabled)");

        tokio::pin!(shutdown_signal);

        loop {
            tokio::select! {
                biased;

                () = &mut shutdown_signal => {
                    info!("Shutdown signal received, stopping update dispatcher");
                    return;
                }

                batch = poller.next_batch() => match batch {
                    Ok(batch) => {
                        for update in batch {
                            self.handle_update(&update).await;
                        }
                    }
                    Err(reason) => {
                        error!(%reason, "failed to fetch updates");
                        tokio::time::sleep(POLL_RETRY_DELAY).await;
                    }
                },
            }
        }
    }
}

/// Extract a command name from message text: `/show`, `/show@debt_bot`.
fn parse_command(text: &str) -> Option<String> {
    let rest = text.strip_prefix('/')?;
    let word = rest.split_whitespace().next()?;
    let name = word.split('@').next().unwrap_or(word);
    if name.is_empty() {
        return None;
    }
    Some(name.to_ascii_lowercase())
}

/// Where a failure reply should go, if anywhere.
///
/// Group chatter gets no error replies; failures there are log-only.
fn reply_target(update: &Update) -> Option<i64> {
    if let Some(query) = &update.callback_query {
        return Some(query.from.id);
    }
    update
        .message
        .as_ref()
        .filter(|m| m.chat.is_private())
        .map(|m| m.chat.id)
}
