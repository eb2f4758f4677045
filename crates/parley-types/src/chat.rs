//! Chat turn types for Parley.
//!
//! A turn is one completed (user message, assistant response) exchange
//! within a session. Sessions are implicit: they exist only as the set of
//! turns sharing a `session_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One completed exchange within a chat session.
///
/// Turns are constructed atomically with both `message` and `response`
/// populated and are immutable once recorded. `created_at` is the sole
/// ordering key; ids are UUIDv7 so id order breaks timestamp ties
/// deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: Uuid,
    /// Opaque, caller-supplied conversation grouping key. Ownership is the
    /// identity collaborator's concern, not validated here.
    pub session_id: String,
    /// Opaque author identifier supplied by the identity collaborator.
    pub user_id: String,
    pub message: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    /// Construct a completed turn stamped with the current time.
    pub fn new(
        session_id: impl Into<String>,
        user_id: impl Into<String>,
        message: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            session_id: session_id.into(),
            user_id: user_id.into(),
            message: message.into(),
            response: response.into(),
            created_at: Utc::now(),
        }
    }
}

/// Result of the public chat operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    /// The assistant's reply text for this turn.
    pub assistant: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_turn_is_complete() {
        let turn = ChatTurn::new("s-1", "u-1", "Hi", "Hello!");
        assert_eq!(turn.session_id, "s-1");
        assert_eq!(turn.user_id, "u-1");
        assert_eq!(turn.message, "Hi");
        assert_eq!(turn.response, "Hello!");
        assert!(!turn.id.is_nil());
    }

    #[test]
    fn test_turn_serde_roundtrip() {
        let turn = ChatTurn::new("s-1", "u-1", "Hi", "Hello!");
        let json = serde_json::to_string(&turn).unwrap();
        let parsed: ChatTurn = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, turn);
    }

    #[test]
    fn test_reply_serialize_shape() {
        let reply = ChatReply {
            assistant: "The answer is 42.".to_string(),
        };
        let json = serde_json::to_string(&reply).unwrap();
        assert_eq!(json, r#"{"assistant":"The answer is 42."}"#);
    }
}
