//! Reply extraction from raw generated text.
//!
//! Engines that echo the prompt return the full rendered markup followed by
//! the generation-start marker and then the new content, possibly followed
//! by further turn markers when the model over-generates. The extractor
//! isolates just the assistant's new text.

use parley_types::error::ExtractionError;

use super::template::{ASSISTANT_MARKER, END_OF_TURN, SYSTEM_MARKER, USER_MARKER};

/// Isolates the assistant's newly generated text from raw engine output.
#[derive(Debug, Clone, Default)]
pub struct ResponseExtractor;

impl ResponseExtractor {
    /// Extract the assistant reply from `raw`.
    ///
    /// Splits on the last occurrence of the generation-start marker and
    /// keeps everything after it; a missing marker is a hard error, since
    /// returning the echoed prompt as a "reply" is never correct. The kept
    /// tail is truncated at the first subsequent role or end-of-turn marker
    /// so a hallucinated next turn never leaks to the user.
    pub fn extract(raw: &str) -> Result<String, ExtractionError> {
        let start = raw
            .rfind(ASSISTANT_MARKER)
            .ok_or(ExtractionError::MarkerMissing(ASSISTANT_MARKER))?;
        let mut tail = &raw[start + ASSISTANT_MARKER.len()..];

        for marker in [USER_MARKER, SYSTEM_MARKER, END_OF_TURN] {
            if let Some(idx) = tail.find(marker) {
                tail = &tail[..idx];
            }
        }

        let reply = tail.trim();
        if reply.is_empty() {
            return Err(ExtractionError::EmptyReply);
        }
        Ok(reply.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_after_last_marker() {
        let raw = "<|system|>\np</s>\n<|user|>\nHi</s>\n<|assistant|>\nHello there!";
        assert_eq!(ResponseExtractor::extract(raw).unwrap(), "Hello there!");
    }

    #[test]
    fn test_strips_trailing_next_turn() {
        let raw = "<prompt...><|assistant|>  The answer is 42.<|user|>";
        assert_eq!(
            ResponseExtractor::extract(raw).unwrap(),
            "The answer is 42."
        );
    }

    #[test]
    fn test_strips_end_of_turn_token() {
        let raw = "<|assistant|>\nSure thing.</s>\n<|user|>\nmore";
        assert_eq!(ResponseExtractor::extract(raw).unwrap(), "Sure thing.");
    }

    #[test]
    fn test_uses_last_marker_when_history_echoed() {
        // Prompt echo contains assistant turns from history; only the text
        // after the final marker is new.
        let raw = "<|assistant|>\nold reply</s>\n<|user|>\nq2</s>\n<|assistant|>\nnew reply";
        assert_eq!(ResponseExtractor::extract(raw).unwrap(), "new reply");
    }

    #[test]
    fn test_missing_marker_is_error() {
        let err = ResponseExtractor::extract("no markers here at all").unwrap_err();
        assert!(matches!(err, ExtractionError::MarkerMissing(_)));
    }

    #[test]
    fn test_marker_with_no_content_is_error() {
        let err = ResponseExtractor::extract("<|assistant|>\n  \n").unwrap_err();
        assert!(matches!(err, ExtractionError::EmptyReply));
    }

    #[test]
    fn test_marker_followed_only_by_next_turn_is_error() {
        let err = ResponseExtractor::extract("<|assistant|><|user|>sneaky").unwrap_err();
        assert!(matches!(err, ExtractionError::EmptyReply));
    }
}
