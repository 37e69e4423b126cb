//! History storage section

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::store::json_store::DEFAULT_HISTORY_LIMIT;

/// `[storage]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Explicit history file path; default is the platform data dir
    pub path: Option<PathBuf>,
    /// Maximum number of stored projects
    pub history_limit: usize,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}
