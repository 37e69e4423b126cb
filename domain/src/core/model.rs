//! Model value object representing a generation backend model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Available generation models (Value Object)
///
/// Models are tried in order by the generation client: when one is
/// rate-limited, the next in the fallback chain takes over.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    GeminiFlash,
    GeminiFlashLite,
    GeminiPro,
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::GeminiFlash => "gemini-2.5-flash",
            Model::GeminiFlashLite => "gemini-2.5-flash-lite",
            Model::GeminiPro => "gemini-2.5-pro",
            Model::Custom(s) => s,
        }
    }

    /// Default fallback chain for meeting turns
    pub fn default_models() -> Vec<Model> {
        vec![Model::GeminiFlash, Model::GeminiFlashLite]
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::GeminiFlash
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "gemini-2.5-flash" => Model::GeminiFlash,
            "gemini-2.5-flash-lite" => Model::GeminiFlashLite,
            "gemini-2.5-pro" => Model::GeminiPro,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(model) = s.parse();
        Ok(model)
    }
}
