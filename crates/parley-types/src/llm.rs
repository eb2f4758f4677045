//! Conversation message and sampling types for Parley.
//!
//! These types model the data shapes exchanged with the inference engine:
//! role-tagged messages and the sampling options passed through to
//! text generation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single role-tagged message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    /// Construct a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Construct a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Construct an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Sampling options passed through unchanged to the inference engine.
///
/// The orchestrator treats these as fixed configuration; it never adjusts
/// them per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingOptions {
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            max_new_tokens: default_max_new_tokens(),
            temperature: default_temperature(),
            top_k: default_top_k(),
            top_p: default_top_p(),
        }
    }
}

fn default_max_new_tokens() -> u32 {
    150
}

fn default_temperature() -> f64 {
    0.7
}

fn default_top_k() -> u32 {
    50
}

fn default_top_p() -> f64 {
    0.95
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::System, MessageRole::User, MessageRole::Assistant] {
            let s = role.to_string();
            let parsed: MessageRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_message_role_serde() {
        let role = MessageRole::Assistant;
        let json = serde_json::to_string(&role).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: MessageRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MessageRole::Assistant);
    }

    #[test]
    fn test_message_role_rejects_unknown() {
        let err = "moderator".parse::<MessageRole>().unwrap_err();
        assert!(err.contains("moderator"));
    }

    #[test]
    fn test_message_constructors() {
        let msg = Message::user("Hi");
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.content, "Hi");
        assert_eq!(Message::system("p").role, MessageRole::System);
        assert_eq!(Message::assistant("r").role, MessageRole::Assistant);
    }

    #[test]
    fn test_sampling_options_defaults() {
        let opts = SamplingOptions::default();
        assert_eq!(opts.max_new_tokens, 150);
        assert!((opts.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(opts.top_k, 50);
        assert!((opts.top_p - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sampling_options_partial_deserialize() {
        let opts: SamplingOptions = serde_json::from_str(r#"{"max_new_tokens": 64}"#).unwrap();
        assert_eq!(opts.max_new_tokens, 64);
        assert_eq!(opts.top_k, 50);
    }
}
