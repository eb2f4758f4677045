//! Chat service orchestrating the conversation pipeline.
//!
//! `ChatService` composes the history store, context window builder, chat
//! template, inference engine, and turn recorder into the single `chatter`
//! operation. Generic over `HistoryStore` and `TextGenerator` so the core
//! never depends on parley-infra.

use tracing::{debug, info};

use parley_types::chat::ChatReply;
use parley_types::config::ChatConfig;
use parley_types::error::ChatError;
use parley_types::llm::SamplingOptions;

use crate::chat::recorder::TurnRecorder;
use crate::context::ContextWindowBuilder;
use crate::history::HistoryStore;
use crate::llm::TextGenerator;
use crate::prompt::{ChatTemplate, ResponseExtractor};

/// Orchestrates one chat exchange per invocation.
///
/// Each call runs the pipeline fetch history -> build context -> render
/// prompt -> generate -> extract -> record, terminal on success or first
/// failure with no internal retries. Only the record stage has a durable
/// side effect and it runs last, so cancelling the returned future during
/// the inference await records nothing.
///
/// No lock is held across the inference await and none is taken per
/// session: concurrent calls for one session may interleave their reads and
/// writes, each missing the other's new turn in its own window.
pub struct ChatService<H: HistoryStore, G: TextGenerator> {
    history: H,
    engine: G,
    window: ContextWindowBuilder,
    template: ChatTemplate,
    sampling: SamplingOptions,
}

impl<H: HistoryStore, G: TextGenerator> ChatService<H, G> {
    /// Create a chat service from its injected dependencies.
    pub fn new(history: H, engine: G, config: &ChatConfig) -> Self {
        Self {
            history,
            engine,
            window: ContextWindowBuilder::new(config.window_size, config.persona.clone()),
            template: ChatTemplate::new(),
            sampling: config.sampling.clone(),
        }
    }

    /// Access the underlying history store.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Produce the assistant's reply to `message` within `session_id`,
    /// conditioned on the session's recent turns, and record the completed
    /// exchange.
    pub async fn chatter(
        &self,
        user_id: &str,
        session_id: &str,
        message: &str,
    ) -> Result<ChatReply, ChatError> {
        let recent = self
            .history
            .recent_turns(session_id, self.window.window_size())
            .await?;
        debug!(session_id, prior_turns = recent.len(), "history fetched");

        let context = self.window.build(recent, message);
        let prompt = self.template.render(&context)?;

        let raw = self.engine.generate(&prompt, &self.sampling).await?;
        let reply = ResponseExtractor::extract(&raw)?;

        let turn = TurnRecorder::new(&self.history)
            .record(user_id, session_id, message, &reply)
            .await?;
        info!(
            session_id,
            turn_id = %turn.id,
            reply_chars = reply.len(),
            "turn recorded"
        );

        Ok(ChatReply { assistant: reply })
    }
}
