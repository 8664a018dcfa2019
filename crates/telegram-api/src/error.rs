//! Error types for the Bot API client.

use thiserror::Error;

/// Errors that can occur when talking to the Telegram Bot API.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error response from the Bot API.
    #[error("API error {error_code}: {description}")]
    Api { error_code: i64, description: String },

    /// The API reported success but returned no result payload.
    #[error("empty result for method {0}")]
    EmptyResult(String),

    /// Connect-time health check (getMe) failed.
    #[error("health check failed")]
    HealthCheckFailed,

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl TelegramError {
    /// Whether this error means the target message no longer exists.
    ///
    /// Deleting an already-deleted message is expected during refresh and
    /// must not be treated as a failure.
    pub fn is_message_not_found(&self) -> bool {
        match self {
            Self::Api {
                error_code: 400,
                description,
            } => {
                description.contains("message to delete not found")
                    || description.contains("message to edit not found")
                    || description.contains("message can't be deleted")
            }
            _ => false,
        }
    }

    /// Whether this error means an edit was a no-op.
    ///
    /// Replayed callbacks can re-issue an identical edit; the API rejects it
    /// with "message is not modified" and the caller can safely ignore that.
    pub fn is_message_not_modified(&self) -> bool {
        matches!(
            self,
            Self::Api {
                error_code: 400,
                description,
            } if description.contains("message is not modified")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_not_found() {
        let err = TelegramError::Api {
            error_code: 400,
            description: "Bad Request: message to delete not found".to_string(),
        };
        assert!(err.is_message_not_found());
        assert!(!err.is_message_not_modified());
    }

    #[test]
    fn test_message_not_modified() {
        let err = TelegramError::Api {
            error_code: 400,
            description: "Bad Request: message is not modified".to_string(),
        };
        assert!(err.is_message_not_modified());
        assert!(!err.is_message_not_found());
    }

    #[test]
    fn test_other_api_error() {
        let err = TelegramError::Api {
            error_code: 403,
            description: "Forbidden: bot was kicked from the group chat".to_string(),
        };
        assert!(!err.is_message_not_found());
        assert!(!err.is_message_not_modified());
    }
}
