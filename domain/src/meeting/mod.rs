//! Meeting data model: rounds, transcript, plan, summary, result

pub mod plan;
pub mod result;
pub mod rounds;
pub mod summary;
pub mod transcript;

pub use plan::{MAX_AGENTS_PER_MEETING, MAX_MEETINGS, PlannedMeeting, sanitize_plan};
pub use result::{MeetingResult, Rating};
pub use rounds::{Answer, CrossQuestion, MeetingData, Round1Result, Round2Result, Round3Result, Source};
pub use summary::{FinalSummary, Summary};
pub use transcript::{Transcript, TranscriptItem};
