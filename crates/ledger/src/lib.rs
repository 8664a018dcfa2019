//! SQLite persistence layer for the debt tracker.
//!
//! This crate provides async database operations for users, groups, debt
//! lists, and debt entries using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use ledger::{debt_list, models::NewDebt, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:debt_tracker.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Create a pending debt list with one entry
//!     let entries = vec![NewDebt {
//!         owed_by: "alice".to_string(),
//!         amount_cents: 1000,
//!     }];
//!     let list_id =
//!         debt_list::create_debt_list(db.pool(), 42, "Lunch", "98765432", &entries).await?;
//!     println!("created list {}", list_id);
//!
//!     Ok(())
//! }
//! ```

pub mod debt;
pub mod debt_list;
pub mod error;
pub mod group;
pub mod models;
pub mod user;

pub use error::{LedgerError, Result};
pub use models::{Debt, DebtList, Group, NewDebt, User};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `sqlite::memory:` for tests.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to database: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is
    /// up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    #[tokio::test]
    async fn test_connect_and_migrate() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();

        let user = User {
            user_id: 7,
            username: Some("alice".to_string()),
            first_name: Some("Alice".to_string()),
            last_name: None,
        };
        user::upsert_user(db.pool(), &user).await.unwrap();

        let fetched = user::get_user(db.pool(), 7).await.unwrap();
        assert_eq!(fetched, user);

        db.close().await;
    }
}
