//! Context window builder.
//!
//! Derives a role-tagged message sequence from the raw turn list the store
//! returns. The derivation is a pure function: same turns + same new message
//! always yield the same context, so it is testable without any store.

use parley_types::chat::ChatTurn;
use parley_types::llm::{Message, MessageRole};

/// A transient, derived message sequence: one system message, then
/// interleaved (user, assistant) pairs from prior turns in chronological
/// order, then the new user message last. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationContext {
    messages: Vec<Message>,
}

impl ConversationContext {
    pub(crate) fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// The ordered messages of this context.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of prior (user, assistant) exchanges in this context,
    /// excluding the system message and the trailing new user message.
    pub fn prior_exchanges(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role == MessageRole::Assistant)
            .count()
    }
}

/// Turns the store's most-recent-first turn list into a chronologically
/// ordered, role-tagged [`ConversationContext`].
#[derive(Debug, Clone)]
pub struct ContextWindowBuilder {
    window_size: usize,
    persona: String,
}

impl ContextWindowBuilder {
    /// Create a builder with the given window size and persona text.
    pub fn new(window_size: usize, persona: impl Into<String>) -> Self {
        Self {
            window_size,
            persona: persona.into(),
        }
    }

    /// Maximum number of prior turns included in a context.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Build the context for a new user message.
    ///
    /// `recent` is the turn list as returned by `HistoryStore::recent_turns`
    /// (newest first). The list is reversed to chronological order, then
    /// stable-sorted by timestamp so equal-timestamp turns keep the store's
    /// retrieval order deterministically. When more than `window_size` turns
    /// are supplied only the most recent ones are kept; fewer turns are used
    /// as-is.
    pub fn build(&self, recent: Vec<ChatTurn>, new_message: &str) -> ConversationContext {
        let mut turns = recent;
        turns.reverse();
        turns.sort_by_key(|t| t.created_at);

        let skip = turns.len().saturating_sub(self.window_size);
        let retained = &turns[skip..];

        let mut messages = Vec::with_capacity(2 * retained.len() + 2);
        messages.push(Message::system(self.persona.clone()));
        for turn in retained {
            messages.push(Message::user(turn.message.clone()));
            messages.push(Message::assistant(turn.response.clone()));
        }
        messages.push(Message::user(new_message));

        ConversationContext::new(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    const PERSONA: &str = "You are a friendly chatbot.";

    /// Turns numbered 1..=n, oldest first, returned newest-first like the store.
    fn recent_turns(n: usize) -> Vec<ChatTurn> {
        let base = Utc::now();
        let mut turns: Vec<ChatTurn> = (1..=n)
            .map(|i| {
                let mut turn =
                    ChatTurn::new("s-1", "u-1", format!("q{i}"), format!("a{i}"));
                turn.created_at = base + Duration::seconds(i as i64);
                turn
            })
            .collect();
        turns.reverse();
        turns
    }

    #[test]
    fn test_empty_history() {
        let builder = ContextWindowBuilder::new(10, PERSONA);
        let ctx = builder.build(Vec::new(), "Hi");

        assert_eq!(
            ctx.messages(),
            &[Message::system(PERSONA), Message::user("Hi")]
        );
        assert_eq!(ctx.prior_exchanges(), 0);
    }

    #[test]
    fn test_fewer_turns_than_window_uses_all() {
        let builder = ContextWindowBuilder::new(10, PERSONA);
        let ctx = builder.build(recent_turns(3), "next");

        assert_eq!(ctx.prior_exchanges(), 3);
        let messages = ctx.messages();
        assert_eq!(messages.len(), 8);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[1].content, "q1");
        assert_eq!(messages[2].content, "a1");
        assert_eq!(messages[5].content, "q3");
        assert_eq!(messages[7], Message::user("next"));
    }

    #[test]
    fn test_window_drops_oldest_turns() {
        // 12 prior turns, window 10: turns 1-2 excluded, 3..=12 kept in order.
        let builder = ContextWindowBuilder::new(10, PERSONA);
        let ctx = builder.build(recent_turns(12), "next");

        assert_eq!(ctx.prior_exchanges(), 10);
        let messages = ctx.messages();
        assert_eq!(messages[1].content, "q3");
        assert!(!messages.iter().any(|m| m.content == "q1"));
        assert!(!messages.iter().any(|m| m.content == "q2"));
        assert_eq!(messages[messages.len() - 2].content, "a12");
        assert_eq!(messages.last().unwrap(), &Message::user("next"));
    }

    #[test]
    fn test_chronological_order_restored() {
        let builder = ContextWindowBuilder::new(10, PERSONA);
        let ctx = builder.build(recent_turns(5), "next");

        let user_contents: Vec<&str> = ctx
            .messages()
            .iter()
            .filter(|m| m.role == MessageRole::User)
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(user_contents, ["q1", "q2", "q3", "q4", "q5", "next"]);
    }

    #[test]
    fn test_equal_timestamps_keep_retrieval_order() {
        let ts = Utc::now();
        let mut first = ChatTurn::new("s", "u", "qa", "ra");
        let mut second = ChatTurn::new("s", "u", "qb", "rb");
        first.created_at = ts;
        second.created_at = ts;

        // Store order: second is newer (retrieved first).
        let builder = ContextWindowBuilder::new(10, PERSONA);
        let ctx = builder.build(vec![second, first], "next");

        let user_contents: Vec<&str> = ctx
            .messages()
            .iter()
            .filter(|m| m.role == MessageRole::User)
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(user_contents, ["qa", "qb", "next"]);
    }

    #[test]
    fn test_new_message_always_last_and_unpaired() {
        for n in [0usize, 1, 5, 15] {
            let builder = ContextWindowBuilder::new(10, PERSONA);
            let ctx = builder.build(recent_turns(n), "tail");
            let messages = ctx.messages();
            assert_eq!(messages.last().unwrap(), &Message::user("tail"));
            assert_eq!(ctx.prior_exchanges(), n.min(10));
            // Strict alternation: user at odd offsets, assistant at even.
            for (i, pair) in messages[1..messages.len() - 1].chunks(2).enumerate() {
                assert_eq!(pair[0].role, MessageRole::User, "exchange {i}");
                assert_eq!(pair[1].role, MessageRole::Assistant, "exchange {i}");
            }
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let turns = recent_turns(4);
        let builder = ContextWindowBuilder::new(10, PERSONA);
        let a = builder.build(turns.clone(), "next");
        let b = builder.build(turns, "next");
        assert_eq!(a, b);
    }
}
