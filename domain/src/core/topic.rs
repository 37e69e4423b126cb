//! Topic value object

use serde::{Deserialize, Serialize};

use crate::core::error::DomainError;

/// The project topic under discussion (Value Object)
///
/// Every meeting in a series analyzes the same topic from a different
/// angle; the topic itself never changes once the project is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topic {
    content: String,
}

impl Topic {
    /// Create a new topic, rejecting empty or whitespace-only input
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::EmptyTopic);
        }
        Ok(Self { content })
    }

    /// Get the topic content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Topic {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Topic::new(s)
    }
}

impl TryFrom<String> for Topic {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Topic::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_creation() {
        let t = Topic::new("Launch a subscription coffee box").unwrap();
        assert_eq!(t.content(), "Launch a subscription coffee box");
    }

    #[test]
    fn test_empty_topic_rejected() {
        assert!(Topic::new("").is_err());
        assert!(Topic::new("   ").is_err());
    }

    #[test]
    fn test_topic_serde_transparent() {
        let t = Topic::new("coffee").unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"coffee\"");
        let back: Topic = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
