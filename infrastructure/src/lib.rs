//! Infrastructure layer for roundtable
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gemini;
pub mod logging;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileApiConfig, FileBehaviorConfig, FileConfig, FileModelsConfig,
    FileStorageConfig,
};
pub use gemini::GeminiBackend;
pub use logging::JsonlEventLogger;
pub use store::JsonFileProjectStore;
