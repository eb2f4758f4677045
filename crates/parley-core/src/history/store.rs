//! HistoryStore trait definition.
//!
//! The append/query port over the persisted turn log. Implementations live
//! in parley-infra (e.g. `SqliteHistoryStore`).

use parley_types::chat::ChatTurn;
use parley_types::error::StorageError;

/// Key-ordered append/query store for chat turns.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
///
/// Turns are immutable once appended; there is no update or delete path.
pub trait HistoryStore: Send + Sync {
    /// Append a completed turn to the log.
    fn append(
        &self,
        turn: &ChatTurn,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;

    /// The most recent turns for a session, newest first.
    ///
    /// Ordered by `created_at` descending with descending id as the
    /// tie-break, at most `limit` entries. A session with no recorded turns
    /// yields an empty Vec, not an error.
    fn recent_turns(
        &self,
        session_id: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<ChatTurn>, StorageError>> + Send;
}
