//! Configuration loading and raw file structures

pub mod file_config;
pub mod loader;

pub use file_config::{
    FileApiConfig, FileBehaviorConfig, FileConfig, FileModelsConfig, FileStorageConfig,
};
pub use loader::ConfigLoader;
