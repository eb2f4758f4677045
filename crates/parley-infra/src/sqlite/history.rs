//! SQLite history store implementation.
//!
//! Implements `HistoryStore` from `parley-core` using sqlx with the split
//! read/write pools: raw queries, a private Row struct for SQLite-to-domain
//! mapping, RFC 3339 datetime round-trips.

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use parley_core::history::HistoryStore;
use parley_types::chat::ChatTurn;
use parley_types::error::StorageError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `HistoryStore`.
pub struct SqliteHistoryStore {
    pool: DatabasePool,
}

impl SqliteHistoryStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain ChatTurn.
struct ChatTurnRow {
    id: String,
    session_id: String,
    user_id: String,
    message: String,
    response: String,
    created_at: String,
}

impl ChatTurnRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            user_id: row.try_get("user_id")?,
            message: row.try_get("message")?,
            response: row.try_get("response")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_turn(self) -> Result<ChatTurn, StorageError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| StorageError::Query(format!("invalid turn id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(ChatTurn {
            id,
            session_id: self.session_id,
            user_id: self.user_id,
            message: self.message,
            response: self.response,
            created_at,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl HistoryStore for SqliteHistoryStore {
    async fn append(&self, turn: &ChatTurn) -> Result<(), StorageError> {
        sqlx::query(
            r#"INSERT INTO chat_turns (id, session_id, user_id, message, response, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(turn.id.to_string())
        .bind(&turn.session_id)
        .bind(&turn.user_id)
        .bind(&turn.message)
        .bind(&turn.response)
        .bind(format_datetime(&turn.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StorageError::Query(e.to_string()))?;

        Ok(())
    }

    async fn recent_turns(
        &self,
        session_id: &str,
        limit: usize,
    ) -> Result<Vec<ChatTurn>, StorageError> {
        // Descending id breaks equal-timestamp ties deterministically
        // (v7 ids are time-sortable).
        let rows = sqlx::query(
            r#"SELECT * FROM chat_turns
               WHERE session_id = ?
               ORDER BY created_at DESC, id DESC
               LIMIT ?"#,
        )
        .bind(session_id)
        .bind(limit as i64)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| StorageError::Query(e.to_string()))?;

        let mut turns = Vec::with_capacity(rows.len());
        for row in &rows {
            let turn_row =
                ChatTurnRow::from_row(row).map_err(|e| StorageError::Query(e.to_string()))?;
            turns.push(turn_row.into_turn()?);
        }

        Ok(turns)
    }
}
