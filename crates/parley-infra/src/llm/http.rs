//! HTTP inference client.
//!
//! Implements `TextGenerator` against a text-generation-inference style
//! server: `POST {base_url}/generate` with a JSON body of inputs plus
//! sampling parameters, returning `{"generated_text": "..."}`.
//!
//! `return_full_text` is requested so the raw output echoes the prompt ahead
//! of the completion, matching the extraction contract even against servers
//! whose default is continuation-only output.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use parley_core::llm::TextGenerator;
use parley_types::config::EngineConfig;
use parley_types::error::InferenceError;
use parley_types::llm::SamplingOptions;

/// Client for a text-generation HTTP endpoint.
pub struct HttpTextGenerator {
    http: reqwest::Client,
    base_url: String,
}

/// JSON request body for the `/generate` endpoint.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
}

#[derive(Debug, Serialize)]
struct GenerateParameters {
    max_new_tokens: u32,
    temperature: f64,
    top_k: u32,
    top_p: f64,
    do_sample: bool,
    return_full_text: bool,
}

/// JSON response body from the `/generate` endpoint.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    generated_text: String,
}

impl HttpTextGenerator {
    /// Create a client from engine configuration.
    ///
    /// The whole-request timeout covers connect + generation + body read;
    /// hitting it maps to `InferenceError::Timeout`.
    pub fn new(config: &EngineConfig) -> Result<Self, InferenceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| InferenceError::Connection(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_body<'a>(prompt: &'a str, options: &SamplingOptions) -> GenerateRequest<'a> {
        GenerateRequest {
            inputs: prompt,
            parameters: GenerateParameters {
                max_new_tokens: options.max_new_tokens,
                temperature: options.temperature,
                top_k: options.top_k,
                top_p: options.top_p,
                do_sample: true,
                return_full_text: true,
            },
        }
    }
}

impl TextGenerator for HttpTextGenerator {
    async fn generate(
        &self,
        prompt: &str,
        options: &SamplingOptions,
    ) -> Result<String, InferenceError> {
        let url = format!("{}/generate", self.base_url);
        let body = Self::build_body(prompt, options);

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::SERVICE_UNAVAILABLE
        {
            let detail = response.text().await.unwrap_or_default();
            return Err(InferenceError::Overloaded(format!("{status}: {detail}")));
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(InferenceError::Engine {
                message: format!("{status}: {detail}"),
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::Deserialization(e.to_string()))?;

        tracing::debug!(chars = parsed.generated_text.len(), "generation complete");
        Ok(parsed.generated_text)
    }
}

fn map_request_error(e: reqwest::Error) -> InferenceError {
    if e.is_timeout() {
        InferenceError::Timeout
    } else if e.is_connect() {
        InferenceError::Connection(e.to_string())
    } else {
        InferenceError::Engine {
            message: e.to_string(),
        }
    }
}
