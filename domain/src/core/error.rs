//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Topic cannot be empty")]
    EmptyTopic,

    #[error("Unknown agent id: {0}")]
    UnknownAgent(String),

    #[error("A meeting needs at least one participant")]
    EmptyRoster,

    #[error("Meeting plan is empty")]
    EmptyPlan,

    #[error("Invalid meeting index: {0}")]
    InvalidMeetingIndex(usize),
}
