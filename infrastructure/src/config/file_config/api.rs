//! Backend credential section

use serde::{Deserialize, Serialize};

/// `[api]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Gemini API key; the `GEMINI_API_KEY` environment variable is the
    /// fallback when this is unset
    pub gemini_api_key: Option<String>,
}

impl FileApiConfig {
    /// Resolve the API key: config file first, then environment
    pub fn resolve_key(&self) -> Option<String> {
        self.gemini_api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()))
    }
}
