//! Ledger error types.

use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// SQLx error (connection, query, etc.)
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Record not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A paid/unpaid toggle requested the state the entry is already in.
    ///
    /// No-op transitions are rejected rather than silently accepted, so a
    /// replayed callback cannot produce a misleading confirmation.
    #[error("debt for {identity} in list {list_id} is already marked {}", if *.paid { "paid" } else { "unpaid" })]
    AlreadyInState {
        list_id: i64,
        identity: String,
        paid: bool,
    },
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
