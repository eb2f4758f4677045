//! Conversation context management and chat orchestration for Parley.
//!
//! This crate defines the "ports" (the `HistoryStore` and `TextGenerator`
//! traits) that the infrastructure layer implements, plus the pure
//! conversation logic between them: context window reconstruction, prompt
//! rendering, reply extraction, and the `chatter` pipeline. It depends only
//! on `parley-types` -- never on `parley-infra` or any IO crate.

pub mod chat;
pub mod context;
pub mod history;
pub mod llm;
pub mod prompt;
