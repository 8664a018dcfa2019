//! Bot configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::BotError;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Bot token issued by @BotFather. Required (`BOT_TOKEN`).
    pub token: String,
    /// SQLite database URL (`DATABASE_URL`).
    pub database_url: String,
    /// How often the refresher walks the posted lists
    /// (`REFRESH_INTERVAL_SECS`).
    pub refresh_interval: Duration,
    /// Age past which a posted message is replaced
    /// (`STALENESS_THRESHOLD_SECS`).
    pub staleness_threshold: Duration,
}

impl BotConfig {
    pub const DEFAULT_DATABASE_URL: &'static str = "sqlite:debt_tracker.db?mode=rwc";

    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, BotError> {
        let token = env::var("BOT_TOKEN")
            .map_err(|_| BotError::Config("BOT_TOKEN environment variable is required".into()))?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| Self::DEFAULT_DATABASE_URL.to_string());

        let refresh_interval = duration_from_env("REFRESH_INTERVAL_SECS", 2 * 60 * 60)?;
        let staleness_threshold = duration_from_env("STALENESS_THRESHOLD_SECS", 24 * 60 * 60)?;

        Ok(Self {
            token,
            database_url,
            refresh_interval,
            staleness_threshold,
        })
    }
}

fn duration_from_env(name: &str, default_secs: u64) -> Result<Duration, BotError> {
    match env::var(name) {
        Err(_) => Ok(Duration::from_secs(default_secs)),
        Ok(value) => value
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| BotError::Config(format!("{} must be a number of seconds", name))),
    }
}
