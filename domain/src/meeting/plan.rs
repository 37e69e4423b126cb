//! Planned meeting sequence and plan sanitization

use serde::{Deserialize, Serialize};

use crate::agent::{AgentId, AgentRegistry};
use crate::core::error::DomainError;

/// Hard cap on participants per meeting
pub const MAX_AGENTS_PER_MEETING: usize = 3;

/// Hard cap on meetings per project
pub const MAX_MEETINGS: usize = 4;

/// One planned meeting: a goal and its ordered participant subset
///
/// Produced once by the planner, immutable afterward. The agent order
/// is the turn order for every round of the meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedMeeting {
    pub goal: String,
    pub agent_ids: Vec<AgentId>,
}

impl PlannedMeeting {
    pub fn new(goal: impl Into<String>, agent_ids: Vec<AgentId>) -> Self {
        Self {
            goal: goal.into(),
            agent_ids,
        }
    }
}

/// Sanitize a raw planner response into a valid plan.
///
/// Mirrors the tolerant-parsing posture of the rest of the pipeline:
/// - unknown agent ids are dropped silently
/// - duplicate ids within a meeting are collapsed, keeping first position
/// - meetings are truncated to [`MAX_AGENTS_PER_MEETING`]
/// - meetings left without participants are dropped
/// - the plan is truncated to [`MAX_MEETINGS`]
///
/// An empty result after sanitization is an error: there is nothing to run.
pub fn sanitize_plan(
    raw: Vec<PlannedMeeting>,
    registry: &AgentRegistry,
) -> Result<Vec<PlannedMeeting>, DomainError> {
    let mut plan = Vec::new();

    for meeting in raw.into_iter().take(MAX_MEETINGS) {
        let mut seen = Vec::new();
        for id in meeting.agent_ids {
            if registry.contains(&id) && !seen.contains(&id) {
                seen.push(id);
            }
            if seen.len() == MAX_AGENTS_PER_MEETING {
                break;
            }
        }
        if !seen.is_empty() {
            plan.push(PlannedMeeting::new(meeting.goal, seen));
        }
    }

    if plan.is_empty() {
        return Err(DomainError::EmptyPlan);
    }
    Ok(plan)
}
