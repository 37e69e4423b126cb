//! Presentation layer for roundtable
//!
//! CLI argument definitions, console/markdown formatting, progress
//! reporting, and interactive prompts.

pub mod cli;
pub mod input;
pub mod output;
pub mod progress;

pub use cli::{Cli, Command, ExportKind};
pub use output::ConsoleFormatter;
pub use output::markdown;
pub use progress::{ProgressReporter, SimpleProgress};
