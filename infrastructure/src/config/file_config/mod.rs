//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into validated runtime
//! types (`BehaviorConfig`, store paths, API credentials) afterwards.

mod api;
mod behavior;
mod models;
mod storage;

pub use api::FileApiConfig;
pub use behavior::FileBehaviorConfig;
pub use models::FileModelsConfig;
pub use storage::FileStorageConfig;

use roundtable_application::BehaviorConfig;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Generation model fallback chain
    pub models: FileModelsConfig,
    /// Orchestration behavior settings
    pub behavior: FileBehaviorConfig,
    /// History storage settings
    pub storage: FileStorageConfig,
    /// Backend credentials
    pub api: FileApiConfig,
}

impl FileConfig {
    /// Convert the raw file structure into the application behavior config
    pub fn behavior_config(&self) -> BehaviorConfig {
        BehaviorConfig {
            turn_delay_ms: self.behavior.turn_delay_ms,
            grounding: self.behavior.grounding,
            models: self.models.parse_fallback(),
        }
    }
}
