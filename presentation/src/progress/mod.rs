//! Progress reporting implementations

pub mod reporter;

pub use reporter::{ProgressReporter, SimpleProgress};
