//! Session history HTTP handler.
//!
//! GET /api/v1/sessions/{session_id}/turns - recent turns, newest first.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use parley_core::history::HistoryStore;
use parley_types::chat::ChatTurn;

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::state::AppState;

/// Query parameters for turn listing.
#[derive(Debug, Deserialize)]
pub struct TurnListQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

/// GET /api/v1/sessions/{session_id}/turns - list recent turns for a session.
///
/// An unknown session returns an empty list, mirroring the store contract.
pub async fn list_turns(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(session_id): Path<String>,
    Query(query): Query<TurnListQuery>,
) -> Result<Json<Vec<ChatTurn>>, AppError> {
    let turns = state
        .chat_service
        .history()
        .recent_turns(&session_id, query.limit)
        .await
        .map_err(|e| AppError::Chat(e.into()))?;

    Ok(Json(turns))
}
