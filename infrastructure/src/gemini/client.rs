//! Gemini HTTP adapter implementing the generation backend port
//!
//! Maps HTTP-level and API-level failures onto the application error
//! taxonomy: 429 / `RESOURCE_EXHAUSTED` become the rate-limit class the
//! fallback policy retries on another model, everything else fails the
//! turn immediately.

use std::time::Duration;

use async_trait::async_trait;
use roundtable_application::ports::generation::{
    GenerationBackend, GenerationError, GenerationOutput, GenerationRequest,
};
use roundtable_domain::Model;
use tracing::debug;

use super::types::{ApiErrorBody, GenerateContentRequest, GenerateContentResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Generation backend talking to the Gemini REST API
pub struct GeminiBackend {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiBackend {
    pub fn new(api_key: impl Into<String>) -> Result<Self, GenerationError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Override the endpoint base URL (tests, proxies)
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| GenerationError::Backend(e.to_string()))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self, model: &Model) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    async fn generate(
        &self,
        model: &Model,
        request: &GenerationRequest,
    ) -> Result<GenerationOutput, GenerationError> {
        let body =
            GenerateContentRequest::from_prompt(&request.prompt, request.grounding, request.json);

        let response = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(map_api_error(status.as_u16(), &text));
        }

        let decoded: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| GenerationError::Backend(format!("undecodable response: {e}")))?;

        if let Some(reason) = decoded
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Err(GenerationError::Blocked(reason));
        }

        let output_text = decoded.text();
        if output_text.is_empty() {
            return Err(GenerationError::Backend(
                "response contained no text".to_string(),
            ));
        }

        debug!(model = %model, bytes = output_text.len(), "generation succeeded");
        Ok(GenerationOutput {
            text: output_text,
            sources: decoded.sources(),
        })
    }
}

fn map_transport_error(e: reqwest::Error) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout
    } else {
        GenerationError::Network(e.to_string())
    }
}

/// Map a non-2xx response onto the error taxonomy.
///
/// The backend's own message is passed through when the error body is
/// decodable so callers can surface it verbatim.
fn map_api_error(status: u16, body: &str) -> GenerationError {
    let api_error = serde_json::from_str::<ApiErrorBody>(body).ok();
    let message = api_error
        .as_ref()
        .map(|b| b.error.message.clone())
        .unwrap_or_else(|| body.chars().take(200).collect());
    let api_status = api_error.map(|b| b.error.status).unwrap_or_default();

    match status {
        429 => GenerationError::RateLimited(message),
        _ if api_status == "RESOURCE_EXHAUSTED" => GenerationError::RateLimited(message),
        401 | 403 => GenerationError::Auth(message),
        400 => GenerationError::InvalidRequest(message),
        _ => GenerationError::Backend(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_mapping_by_status_code() {
        let err = map_api_error(429, r#"{"error": {"message": "slow down", "status": "RESOURCE_EXHAUSTED"}}"#);
        assert!(err.is_rate_limited());
        assert!(err.to_string().contains("slow down"));
    }

    #[test]
    fn test_rate_limit_mapping_by_api_status() {
        // Some proxies surface quota errors with a different HTTP code
        let err = map_api_error(500, r#"{"error": {"message": "quota", "status": "RESOURCE_EXHAUSTED"}}"#);
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_auth_mapping() {
        let err = map_api_error(403, r#"{"error": {"message": "API key not valid", "status": "PERMISSION_DENIED"}}"#);
        assert!(matches!(err, GenerationError::Auth(_)));
    }

    #[test]
    fn test_invalid_request_mapping() {
        let err = map_api_error(400, r#"{"error": {"message": "bad prompt", "status": "INVALID_ARGUMENT"}}"#);
        assert!(matches!(err, GenerationError::InvalidRequest(_)));
    }

    #[test]
    fn test_undecodable_error_body_truncated_passthrough() {
        let err = map_api_error(503, "upstream unavailable");
        match err {
            GenerationError::Backend(msg) => assert_eq!(msg, "upstream unavailable"),
            other => panic!("expected Backend, got {other:?}"),
        }
    }

    #[test]
    fn test_endpoint_includes_model_id() {
        let backend = GeminiBackend::with_base_url("key", "http://localhost:9999/v1beta").unwrap();
        assert_eq!(
            backend.endpoint(&Model::GeminiFlash),
            "http://localhost:9999/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
