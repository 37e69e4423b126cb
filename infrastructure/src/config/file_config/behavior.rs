//! Orchestration behavior section

use serde::{Deserialize, Serialize};

/// `[behavior]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Settling delay between turns, in milliseconds
    pub turn_delay_ms: u64,
    /// Web-grounding for discussion rounds
    pub grounding: bool,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        Self {
            turn_delay_ms: 1000,
            grounding: true,
        }
    }
}
