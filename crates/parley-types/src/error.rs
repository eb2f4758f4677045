use thiserror::Error;

use crate::llm::MessageRole;

/// Errors from history store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// Errors from prompt assembly.
///
/// A FormatError indicates a contract violation between the context builder
/// and the prompt assembler. It should never occur for contexts produced by
/// `ContextWindowBuilder`; tests treat it as a bug signal.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("context has no messages")]
    EmptyContext,

    #[error("context must begin with a system message")]
    MissingSystem,

    #[error("context must end with a user message, got {0}")]
    TrailingRole(MessageRole),
}

/// Errors from the inference engine.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("inference request timed out")]
    Timeout,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("engine overloaded: {0}")]
    Overloaded(String),

    #[error("engine error: {message}")]
    Engine { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Errors from extracting the assistant reply out of raw generated text.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("generation marker '{0}' not found in raw output")]
    MarkerMissing(&'static str),

    #[error("extracted reply is empty")]
    EmptyReply,
}

/// Any failure of the chat pipeline.
///
/// Each variant aborts the remaining stages of the invocation; the turn is
/// only recorded after every fallible stage has succeeded.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_format_error_display() {
        let err = FormatError::TrailingRole(MessageRole::Assistant);
        assert_eq!(
            err.to_string(),
            "context must end with a user message, got assistant"
        );
    }

    #[test]
    fn test_extraction_error_display() {
        let err = ExtractionError::MarkerMissing("<|assistant|>");
        assert!(err.to_string().contains("<|assistant|>"));
    }

    #[test]
    fn test_chat_error_is_transparent() {
        let err: ChatError = InferenceError::Timeout.into();
        assert_eq!(err.to_string(), "inference request timed out");
        assert!(matches!(err, ChatError::Inference(InferenceError::Timeout)));
    }
}
