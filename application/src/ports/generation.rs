//! Generation backend port
//!
//! Defines the interface for the text-generation capability. The
//! application layer only ever sees prompts in and `{text, sources}`
//! out; model selection and fallback policy live in
//! [`crate::generation::GenerationClient`].

use async_trait::async_trait;
use roundtable_domain::{Model, Source};
use thiserror::Error;

/// Errors that can occur during a generation call
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Rate-limit-class failure; the caller may retry on another model
    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Request rejected: {0}")]
    InvalidRequest(String),

    /// Content policy rejection from the backend
    #[error("Generation blocked: {0}")]
    Blocked(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl GenerationError {
    /// True for failures the fallback policy treats as retryable on the
    /// next model in the chain
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GenerationError::RateLimited(_))
    }
}

/// One generation request
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Enable web-grounding; grounded calls yield citation sources
    pub grounding: bool,
    /// Ask the backend for a JSON response body (mutually exclusive with
    /// grounding on the wire; grounded calls rely on the tolerant parser)
    pub json: bool,
}

impl GenerationRequest {
    /// Grounded request: web search enabled, free-form text out
    pub fn grounded(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            grounding: true,
            json: false,
        }
    }

    /// Ungrounded request with JSON response mode
    pub fn json(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            grounding: false,
            json: true,
        }
    }
}

/// Result of a generation call
#[derive(Debug, Clone, Default)]
pub struct GenerationOutput {
    pub text: String,
    pub sources: Vec<Source>,
}

impl GenerationOutput {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sources: Vec::new(),
        }
    }
}

/// Port for the text-generation capability
///
/// Implementations (adapters) live in the infrastructure layer. A call
/// is the single suspension point of a turn; everything else in the
/// engine is synchronous.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(
        &self,
        model: &Model,
        request: &GenerationRequest,
    ) -> Result<GenerationOutput, GenerationError>;
}
