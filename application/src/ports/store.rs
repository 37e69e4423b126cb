//! Project store port
//!
//! The store is the only shared mutable resource across process
//! restarts. It persists [`Project`] snapshots with upsert-by-id
//! semantics; the series controller is the sole mutator of the
//! aggregates it hands over.

use async_trait::async_trait;
use roundtable_domain::Project;
use thiserror::Error;

/// Errors raised by store adapters
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Stored record is corrupt: {0}")]
    Corrupt(String),

    #[error("No project with id {0}")]
    NotFound(String),
}

/// Port for persisting and retrieving project state
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Insert or replace the project with the same id
    async fn save(&self, project: &Project) -> Result<(), StoreError>;

    /// Load a project by id; `Ok(None)` when it does not exist
    async fn load(&self, id: &str) -> Result<Option<Project>, StoreError>;

    /// All stored projects, most recently updated first, capped at the
    /// adapter's configured history limit
    async fn list(&self) -> Result<Vec<Project>, StoreError>;
}
