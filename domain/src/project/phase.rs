//! Lifecycle phase enums for meetings, series, and stored projects

use serde::{Deserialize, Serialize};

/// Persisted status of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

/// Turn-engine states within one meeting
///
/// `Round1 → Round2 → Round3 → Synthesis → Complete`, with conditional
/// skips straight to `Synthesis` when a round raised no cross-questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    Round1,
    Round2,
    Round3,
    Synthesis,
    Complete,
}

impl RoundPhase {
    /// Human-readable label used in system transcript items and progress output
    pub fn label(&self) -> &'static str {
        match self {
            RoundPhase::Round1 => "Round 1",
            RoundPhase::Round2 => "Round 2",
            RoundPhase::Round3 => "Round 3",
            RoundPhase::Synthesis => "Synthesis",
            RoundPhase::Complete => "Complete",
        }
    }

    /// True while agent turns are still being processed
    pub fn is_discussion_round(&self) -> bool {
        matches!(
            self,
            RoundPhase::Round1 | RoundPhase::Round2 | RoundPhase::Round3
        )
    }
}

impl std::fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Controller states across the whole meeting series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesPhase {
    /// A meeting is currently being driven by the turn engine
    InMeeting,
    /// A meeting finished; waiting for steering text before the next one
    AwaitingUserInput,
    /// All meetings done; the final report has not been produced yet
    FinalSynthesis,
    /// The final report exists; the series is over
    FinalComplete,
}
