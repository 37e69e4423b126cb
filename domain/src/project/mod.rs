//! Project aggregate, lifecycle phases, and resumable snapshots

pub mod entities;
pub mod phase;
pub mod snapshot;

pub use entities::{Project, ResumePoint, StateInconsistency};
pub use phase::{ProjectStatus, RoundPhase, SeriesPhase};
pub use snapshot::MeetingSnapshot;
