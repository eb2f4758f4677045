//! Chat template rendering.
//!
//! Renders a [`ConversationContext`] into the single prompt string the
//! inference engine expects, using Zephyr-style chat markup:
//!
//! ```text
//! <|system|>
//! You are a friendly chatbot.</s>
//! <|user|>
//! Hi</s>
//! <|assistant|>
//! ```
//!
//! The rendered prompt always ends with the generation-start marker so the
//! engine continues as the assistant.

use parley_types::error::FormatError;
use parley_types::llm::MessageRole;

use crate::context::ConversationContext;

/// Role marker opening a system turn.
pub const SYSTEM_MARKER: &str = "<|system|>";
/// Role marker opening a user turn.
pub const USER_MARKER: &str = "<|user|>";
/// Role marker opening an assistant turn; doubles as the generation-start
/// marker at the end of a rendered prompt.
pub const ASSISTANT_MARKER: &str = "<|assistant|>";
/// End-of-turn token.
pub const END_OF_TURN: &str = "</s>";

/// Deterministic renderer from context to prompt string.
#[derive(Debug, Clone, Default)]
pub struct ChatTemplate;

impl ChatTemplate {
    pub fn new() -> Self {
        Self
    }

    /// Render the context as one inference-ready prompt string.
    ///
    /// Pure function of its input: identical contexts yield byte-identical
    /// prompts. Fails fast on a malformed context instead of producing an
    /// unusable prompt: the context must be non-empty, start with a system
    /// message, and end with a user message (the unanswered new input).
    pub fn render(&self, context: &ConversationContext) -> Result<String, FormatError> {
        let messages = context.messages();

        let first = messages.first().ok_or(FormatError::EmptyContext)?;
        if first.role != MessageRole::System {
            return Err(FormatError::MissingSystem);
        }
        let last = messages.last().ok_or(FormatError::EmptyContext)?;
        if last.role != MessageRole::User {
            return Err(FormatError::TrailingRole(last.role));
        }

        let mut prompt = String::new();
        for message in messages {
            let marker = match message.role {
                MessageRole::System => SYSTEM_MARKER,
                MessageRole::User => USER_MARKER,
                MessageRole::Assistant => ASSISTANT_MARKER,
            };
            prompt.push_str(marker);
            prompt.push('\n');
            prompt.push_str(&message.content);
            prompt.push_str(END_OF_TURN);
            prompt.push('\n');
        }
        prompt.push_str(ASSISTANT_MARKER);
        prompt.push('\n');

        Ok(prompt)
    }
}
