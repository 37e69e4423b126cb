//! Use cases orchestrating the domain through the ports

pub mod plan_meetings;
pub mod run_meeting;
pub mod run_series;

pub use plan_meetings::{PlanMeetingsUseCase, PlanningError};
pub use run_meeting::{MeetingEngine, StepOutcome, TurnError};
pub use run_series::{SeriesController, SeriesError, SeriesEvent};
