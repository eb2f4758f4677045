//! TextGenerator trait definition.
//!
//! The port through which the orchestrator invokes the inference engine.
//! The engine's lifecycle (model weights, device placement, batching) is
//! owned by the hosting process; the engine reaches the orchestrator as an
//! injected dependency, never as global state.

use parley_types::error::InferenceError;
use parley_types::llm::SamplingOptions;

/// Text-generation backend (e.g. an HTTP inference server).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in parley-infra (e.g. `HttpTextGenerator`).
pub trait TextGenerator: Send + Sync {
    /// Generate raw text from a rendered prompt.
    ///
    /// A single blocking call with no retry; sampling options pass through
    /// unchanged. The returned text may echo the full prompt ahead of the
    /// new content -- the caller extracts the reply. Dropping the returned
    /// future cancels the request.
    fn generate(
        &self,
        prompt: &str,
        options: &SamplingOptions,
    ) -> impl std::future::Future<Output = Result<String, InferenceError>> + Send;
}
