//! Turn recorder.
//!
//! Persists a completed (message, response) exchange as a single atomic
//! `ChatTurn`. The recorder runs only after a reply has been successfully
//! extracted, so a failed inference call can never leave a partial
//! (message-only) turn behind.

use parley_types::chat::ChatTurn;
use parley_types::error::StorageError;

use crate::history::HistoryStore;

/// Records completed turns into a [`HistoryStore`].
pub struct TurnRecorder<'a, H: HistoryStore> {
    store: &'a H,
}

impl<'a, H: HistoryStore> TurnRecorder<'a, H> {
    pub fn new(store: &'a H) -> Self {
        Self { store }
    }

    /// Construct the completed turn and append it to the store.
    ///
    /// Stamps the turn with a fresh v7 id and the current time, so the
    /// persisted log stays ordered by creation instant.
    pub async fn record(
        &self,
        user_id: &str,
        session_id: &str,
        message: &str,
        response: &str,
    ) -> Result<ChatTurn, StorageError> {
        let turn = ChatTurn::new(session_id, user_id, message, response);
        self.store.append(&turn).await?;
        Ok(turn)
    }
}
