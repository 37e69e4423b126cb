//! Model chain section

use roundtable_domain::Model;
use serde::{Deserialize, Serialize};

/// `[models]` section: the ordered generation fallback chain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Model ids tried in order; empty means the built-in defaults
    pub fallback: Vec<String>,
}

impl FileModelsConfig {
    /// Parse the configured chain, skipping blank entries
    pub fn parse_fallback(&self) -> Vec<Model> {
        let parsed: Vec<Model> = self
            .fallback
            .iter()
            .filter(|s| !s.trim().is_empty())
            .filter_map(|s| s.parse().ok())
            .collect();
        if parsed.is_empty() {
            Model::default_models()
        } else {
            parsed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_falls_back_to_defaults() {
        assert_eq!(FileModelsConfig::default().parse_fallback(), Model::default_models());
    }

    #[test]
    fn test_blank_entries_skipped() {
        let config = FileModelsConfig {
            fallback: vec!["".to_string(), "gemini-2.5-pro".to_string()],
        };
        assert_eq!(config.parse_fallback(), vec![Model::GeminiPro]);
    }
}
