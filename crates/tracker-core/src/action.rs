//! Typed inline-button callback payloads.
//!
//! Button payloads travel through the platform as opaque strings
//! (`"pay:3"`, `"sendToGroup:-100123:3"`). They are decoded into [`Action`]
//! at the boundary and validated there, so handlers never split strings.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A callback payload could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The action tag is not one of ours (e.g. a button from an old build).
    #[error("unknown callback action: '{0}'")]
    UnknownAction(String),

    /// Known tag, but wrong parameter count or non-numeric parameter.
    #[error("malformed callback payload: '{0}'")]
    MalformedPayload(String),
}

/// A decoded inline-button action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Owner confirms a pending debt list.
    ConfirmInput { list_id: i64 },
    /// Owner routes a confirmed list to a group.
    SendToGroup { group_id: i64, list_id: i64 },
    /// A participant marks their share paid.
    Pay { list_id: i64 },
    /// A participant marks their share unpaid.
    Unpay { list_id: i64 },
    /// Owner confirms deletion of all their lists.
    ConfirmClear,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfirmInput { list_id } => write!(f, "confirmInput:{}", list_id),
            Self::SendToGroup { group_id, list_id } => {
                write!(f, "sendToGroup:{}:{}", group_id, list_id)
            }
            Self::Pay { list_id } => write!(f, "pay:{}", list_id),
            Self::Unpay { list_id } => write!(f, "unpay:{}", list_id),
            Self::ConfirmClear => write!(f, "confirmClear"),
        }
    }
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let malformed = || ActionError::MalformedPayload(data.to_string());
        let parse_id = |part: &str| part.parse::<i64>().map_err(|_| malformed());

        let mut parts = data.split(':');
        let tag = parts.next().unwrap_or_default();
        let params: Vec<&str> = parts.collect();

        match (tag, params.as_slice()) {
            ("confirmInput", [list_id]) => Ok(Self::ConfirmInput {
                list_id: parse_id(list_id)?,
            }),
            ("sendToGroup", [group_id, list_id]) => Ok(Self::SendToGroup {
                group_id: parse_id(group_id)?,
                list_id: parse_id(list_id)?,
            }),
            ("pay", [list_id]) => Ok(Self::Pay {
                list_id: parse_id(list_id)?,
            }),
            ("unpay", [list_id]) => Ok(Self::Unpay {
                list_id: parse_id(list_id)?,
            }),
            ("confirmClear", []) => Ok(Self::ConfirmClear),
            ("confirmInput" | "sendToGroup" | "pay" | "unpay" | "confirmClear", _) => {
                Err(malformed())
            }
            _ => Err(ActionError::UnknownAction(data.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let actions = [
            Action::ConfirmInput { list_id: 3 },
            Action::SendToGroup {
                group_id: -100123,
                list_id: 7,
            },
            Action::Pay { list_id: 1 },
            Action::Unpay { list_id: 1 },
            Action::ConfirmClear,
        ];
        for action in actions {
            let encoded = action.to_string();
            assert_eq!(encoded.parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_negative_group_ids_survive() {
        // Supergroup chat ids are negative
        let action: Action = "sendToGroup:-1001234567890:5".parse().unwrap();
        assert_eq!(
            action,
            Action::SendToGroup {
                group_id: -1001234567890,
                list_id: 5
            }
        );
    }

    #[test]
    fn test_unknown_action() {
        assert_eq!(
            "resend:1".parse::<Action>(),
            Err(ActionError::UnknownAction("resend:1".to_string()))
        );
    }

    #[test]
    fn test_wrong_arity() {
        assert_eq!(
            "pay:1:2".parse::<Action>(),
            Err(ActionError::MalformedPayload("pay:1:2".to_string()))
        );
        assert_eq!(
            "sendToGroup:1".parse::<Action>(),
            Err(ActionError::MalformedPayload("sendToGroup:1".to_string()))
        );
        assert_eq!(
            "confirmClear:9".parse::<Action>(),
            Err(ActionError::MalformedPayload("confirmClear:9".to_string()))
        );
    }

    #[test]
    fn test_non_numeric_parameter() {
        assert_eq!(
            "pay:abc".parse::<Action>(),
            Err(ActionError::MalformedPayload("pay:abc".to_string()))
        );
    }
}
