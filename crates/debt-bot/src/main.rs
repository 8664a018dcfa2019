use debt_bot::{BotConfig, Dispatcher, ListRefresher, TelegramTransport};
use ledger::Database;
use telegram_api::{ApiConfig, BotClient, UpdatePoller};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = BotConfig::from_env()?;

    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let client = BotClient::connect(ApiConfig::new(&config.token)).await?;

    // One independent timer task keeps posted lists fresh; everything else
    // is driven by incoming updates.
    let refresher = ListRefresher::new(
        db.clone(),
        TelegramTransport::new(client.clone()),
        config.staleness_threshold,
    );
    let refresh_interval = config.refresh_interval;
    tokio::spawn(async move { refresher.run(refresh_interval).await });

    let dispatcher = Dispatcher::new(db, TelegramTransport::new(client.clone()));
    let mut poller = UpdatePoller::new(client);

    let shutdown = async {
        if let Err(reason) = tokio::signal::ctrl_c().await {
            tracing::error!(%reason, "failed to listen for ctrl-c");
        }
    };
    dispatcher.run_with_shutdown(&mut poller, shutdown).await;

    info!("Shut down cleanly");
    Ok(())
}
