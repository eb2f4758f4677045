//! Conversation context reconstruction from the persisted turn log.

pub mod window;

pub use window::{ContextWindowBuilder, ConversationContext};
