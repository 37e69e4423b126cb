//! Generation client with model-fallback retry policy
//!
//! Wraps the [`GenerationBackend`] port with an ordered model chain:
//! a rate-limit-class failure moves on to the next model, any other
//! failure surfaces immediately. There is no other automatic retry in
//! the core — higher-level retry is always caller-initiated.

use std::sync::Arc;

use roundtable_domain::Model;
use tracing::{debug, warn};

use crate::ports::generation::{
    GenerationBackend, GenerationError, GenerationOutput, GenerationRequest,
};

/// Backend wrapper applying the fallback policy
pub struct GenerationClient<B: GenerationBackend> {
    backend: Arc<B>,
    models: Vec<Model>,
}

impl<B: GenerationBackend> GenerationClient<B> {
    pub fn new(backend: Arc<B>, models: Vec<Model>) -> Self {
        let models = if models.is_empty() {
            Model::default_models()
        } else {
            models
        };
        Self { backend, models }
    }

    /// The configured fallback chain, in attempt order
    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// Run one generation request through the fallback chain
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutput, GenerationError> {
        let mut last_error = GenerationError::Backend("no models configured".to_string());

        for model in &self.models {
            debug!(model = %model, grounding = request.grounding, "generation call");
            match self.backend.generate(model, request).await {
                Ok(output) => return Ok(output),
                Err(e) if e.is_rate_limited() => {
                    warn!(model = %model, "rate limited, trying next model");
                    last_error = e;
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Backend scripted with one queued result per call
    struct ScriptedBackend {
        results: Mutex<VecDeque<Result<GenerationOutput, GenerationError>>>,
        calls: Mutex<Vec<Model>>,
    }

    impl ScriptedBackend {
        fn new(results: Vec<Result<GenerationOutput, GenerationError>>) -> Self {
            Self {
                results: Mutex::new(VecDeque::from(results)),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerationBackend for ScriptedBackend {
        async fn generate(
            &self,
            model: &Model,
            _request: &GenerationRequest,
        ) -> Result<GenerationOutput, GenerationError> {
            self.calls.lock().unwrap().push(model.clone());
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GenerationError::Backend("script exhausted".to_string())))
        }
    }

    fn models() -> Vec<Model> {
        vec![Model::GeminiFlash, Model::GeminiFlashLite]
    }

    #[tokio::test]
    async fn test_first_model_success_stops_chain() {
        let backend = Arc::new(ScriptedBackend::new(vec![Ok(GenerationOutput::text_only(
            "hello",
        ))]));
        let client = GenerationClient::new(Arc::clone(&backend), models());

        let output = client
            .generate(&GenerationRequest::json("p"))
            .await
            .unwrap();
        assert_eq!(output.text, "hello");
        assert_eq!(backend.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rate_limit_falls_through_to_next_model() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Err(GenerationError::RateLimited("quota".to_string())),
            Ok(GenerationOutput::text_only("from fallback")),
        ]));
        let client = GenerationClient::new(Arc::clone(&backend), models());

        let output = client
            .generate(&GenerationRequest::json("p"))
            .await
            .unwrap();
        assert_eq!(output.text, "from fallback");
        assert_eq!(
            *backend.calls.lock().unwrap(),
            vec![Model::GeminiFlash, Model::GeminiFlashLite]
        );
    }

    #[tokio::test]
    async fn test_non_rate_limit_error_fails_immediately() {
        let backend = Arc::new(ScriptedBackend::new(vec![Err(GenerationError::Auth(
            "invalid key".to_string(),
        ))]));
        let client = GenerationClient::new(Arc::clone(&backend), models());

        let err = client
            .generate(&GenerationRequest::json("p"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Auth(_)));
        assert_eq!(backend.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_all_models_rate_limited_surfaces_last_error() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Err(GenerationError::RateLimited("first".to_string())),
            Err(GenerationError::RateLimited("second".to_string())),
        ]));
        let client = GenerationClient::new(Arc::clone(&backend), models());

        let err = client
            .generate(&GenerationRequest::json("p"))
            .await
            .unwrap_err();
        match err {
            GenerationError::RateLimited(msg) => assert_eq!(msg, "second"),
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_model_list_uses_defaults() {
        let backend = Arc::new(ScriptedBackend::new(vec![]));
        let client = GenerationClient::new(backend, vec![]);
        assert_eq!(client.models(), Model::default_models().as_slice());
    }
}
