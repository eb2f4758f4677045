//! Chat HTTP handler.
//!
//! POST /api/v1/chat
//!
//! The sole externally observable entry point of the conversation core:
//! takes a session id and a user message, returns the assistant reply.
//! The authenticated key supplies the opaque user identity.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use parley_types::chat::ChatReply;

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::state::AppState;

/// Request body for the chat endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Opaque conversation grouping key, chosen by the caller.
    pub session_id: String,
    /// The user message for this turn.
    pub message: String,
}

/// POST /api/v1/chat - produce a context-conditioned reply and record the turn.
pub async fn chat(
    State(state): State<AppState>,
    auth: Authenticated,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    if body.session_id.trim().is_empty() {
        return Err(AppError::Validation(
            "session_id must not be empty".to_string(),
        ));
    }
    if body.message.trim().is_empty() {
        return Err(AppError::Validation(
            "message must not be empty".to_string(),
        ));
    }

    let reply = state
        .chat_service
        .chatter(&auth.user_id, &body.session_id, &body.message)
        .await?;

    Ok(Json(reply))
}
