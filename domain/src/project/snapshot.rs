//! In-flight meeting snapshot for resumability

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::meeting::rounds::MeetingData;
use crate::meeting::transcript::Transcript;
use crate::project::phase::RoundPhase;

/// Everything needed to reconstruct a meeting mid-flight
///
/// Captured after every turn-engine transition so a later process can
/// resume at the exact agent/round position rather than only at meeting
/// boundaries. Must round-trip bit-exactly through serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSnapshot {
    pub phase: RoundPhase,
    pub meeting_index: usize,
    pub agent_cursor: usize,
    pub meeting_data: MeetingData,
    pub transcript: Transcript,
    pub started_at: DateTime<Utc>,
}
