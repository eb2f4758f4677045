//! Application error type mapping to HTTP status codes and a JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use parley_types::error::{ChatError, InferenceError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Chat pipeline failures.
    Chat(ChatError),
    /// Authentication failure.
    Unauthorized(String),
    /// Request validation error.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Chat(ChatError::Storage(e)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
                e.to_string(),
            ),
            AppError::Chat(ChatError::Format(e)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PROMPT_FORMAT_ERROR",
                e.to_string(),
            ),
            AppError::Chat(ChatError::Inference(InferenceError::Timeout)) => (
                StatusCode::GATEWAY_TIMEOUT,
                "INFERENCE_TIMEOUT",
                "inference request timed out".to_string(),
            ),
            AppError::Chat(ChatError::Inference(e)) => {
                (StatusCode::BAD_GATEWAY, "INFERENCE_ERROR", e.to_string())
            }
            AppError::Chat(ChatError::Extraction(e)) => {
                (StatusCode::BAD_GATEWAY, "GENERATION_FAILED", e.to_string())
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        let body = json!({
            "error": {
                "code": code,
                "message": message,
            }
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
