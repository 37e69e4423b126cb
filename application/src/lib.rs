//! Application layer for roundtable
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod generation;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use generation::GenerationClient;
pub use ports::{
    event_logger::{EventLogger, NoEventLogger, OrchestrationEvent},
    generation::{GenerationBackend, GenerationError, GenerationOutput, GenerationRequest},
    progress::{MeetingProgress, NoProgress},
    store::{ProjectStore, StoreError},
};
pub use use_cases::plan_meetings::{PlanMeetingsUseCase, PlanningError};
pub use use_cases::run_meeting::{MeetingContext, MeetingEngine, StepOutcome, TurnError};
pub use use_cases::run_series::{
    SeriesController, SeriesError, SeriesEvent, attach_rating,
};
