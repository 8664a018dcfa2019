//! Bot error types.

use thiserror::Error;

use crate::transport::TransportError;
use ledger::LedgerError;

/// Errors that can escape a handler.
///
/// Validation failures (unparseable input, undecodable callback payloads)
/// never surface here; handlers translate those into corrective replies on
/// the spot. What remains is reported to the actor as a generic failure at
/// the dispatcher boundary and logged.
#[derive(Debug, Error)]
pub enum BotError {
    /// Persistence failure, or a state guard the handler chose to propagate.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Message send/edit/delete failure.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}
