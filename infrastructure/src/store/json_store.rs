//! JSON file-backed project store
//!
//! The whole history lives in one JSON file: an array of projects,
//! most recently updated first, capped at a configurable limit. Saves
//! are upserts by project id, written atomically (temp file + rename).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use roundtable_application::ports::store::{ProjectStore, StoreError};
use roundtable_domain::Project;
use tracing::warn;

pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Single-file JSON store with upsert-by-id semantics
pub struct JsonFileProjectStore {
    path: PathBuf,
    limit: usize,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl JsonFileProjectStore {
    pub fn new(path: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            path: path.into(),
            limit: limit.max(1),
            lock: Mutex::new(()),
        }
    }

    /// Store under the platform data directory (e.g.
    /// `~/.local/share/roundtable/history.json`)
    pub fn at_default_location(limit: usize) -> Result<Self, StoreError> {
        let dir = dirs::data_dir()
            .ok_or_else(|| StoreError::Io("no platform data directory".to_string()))?
            .join("roundtable");
        Ok(Self::new(dir.join("history.json"), limit))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full history; a missing or corrupt file is an empty
    /// history, not an error (the next save rewrites it).
    fn read_all(&self) -> Vec<Project> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), "history unreadable: {e}");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(projects) => projects,
            Err(e) => {
                warn!(path = %self.path.display(), "history corrupt, starting fresh: {e}");
                Vec::new()
            }
        }
    }

    fn write_all(&self, projects: &[Project]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let body = serde_json::to_string_pretty(projects)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ProjectStore for JsonFileProjectStore {
    async fn save(&self, project: &Project) -> Result<(), StoreError> {
        let _guard = self.lock.lock().map_err(|_| {
            StoreError::Io("store lock poisoned".to_string())
        })?;

        let mut projects = self.read_all();
        match projects.iter_mut().find(|p| p.id == project.id) {
            Some(existing) => *existing = project.clone(),
            None => projects.push(project.clone()),
        }
        projects.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        projects.truncate(self.limit);

        self.write_all(&projects)
    }

    async fn load(&self, id: &str) -> Result<Option<Project>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| {
            StoreError::Io("store lock poisoned".to_string())
        })?;
        Ok(self.read_all().into_iter().find(|p| p.id == id))
    }

    async fn list(&self) -> Result<Vec<Project>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| {
            StoreError::Io("store lock poisoned".to_string())
        })?;
        let mut projects = self.read_all();
        projects.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        projects.truncate(self.limit);
        Ok(projects)
    }
}
