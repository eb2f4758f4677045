//! Service configuration for Parley.
//!
//! Deserialized from `config.toml` in the data directory. Every field has a
//! serde default so a partial (or absent) file yields a working configuration.

use serde::{Deserialize, Serialize};

use crate::llm::SamplingOptions;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Conversation context settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Maximum number of prior turns included in the context window.
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Persona text for the leading system message.
    #[serde(default = "default_persona")]
    pub persona: String,
    #[serde(default)]
    pub sampling: SamplingOptions,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            persona: default_persona(),
            sampling: SamplingOptions::default(),
        }
    }
}

/// Inference engine endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Base URL of the text-generation server.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout for a generate call, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_window_size() -> usize {
    10
}

fn default_persona() -> String {
    "You are a friendly chatbot.".to_string()
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GlobalConfig::default();
        assert_eq!(config.chat.window_size, 10);
        assert_eq!(config.chat.persona, "You are a friendly chatbot.");
        assert_eq!(config.chat.sampling.max_new_tokens, 150);
        assert_eq!(config.engine.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.engine.request_timeout_secs, 120);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: GlobalConfig = toml::from_str(
            r#"
[chat]
window_size = 4

[engine]
base_url = "http://gpu-box:3000"
"#,
        )
        .unwrap();
        assert_eq!(config.chat.window_size, 4);
        assert_eq!(config.chat.persona, "You are a friendly chatbot.");
        assert_eq!(config.chat.sampling.top_k, 50);
        assert_eq!(config.engine.base_url, "http://gpu-box:3000");
        assert_eq!(config.engine.request_timeout_secs, 120);
    }

    #[test]
    fn test_sampling_overrides() {
        let config: GlobalConfig = toml::from_str(
            r#"
[chat.sampling]
temperature = 0.2
max_new_tokens = 300
"#,
        )
        .unwrap();
        assert!((config.chat.sampling.temperature - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.chat.sampling.max_new_tokens, 300);
        assert_eq!(config.chat.sampling.top_k, 50);
    }
}
