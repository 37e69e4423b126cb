//! Durable record of a completed meeting

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::agent::AgentId;
use crate::meeting::summary::Summary;
use crate::meeting::transcript::Transcript;

/// Per-agent feedback rating on a completed meeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Up,
    Down,
}

/// The durable record of one completed meeting
///
/// Appended to the project's result list in meeting order and never
/// mutated afterwards, with two exceptions: `user_feedback` is attached
/// once between meetings, and `agent_ratings` accumulate after the fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingResult {
    pub goal: String,
    pub agent_ids: Vec<AgentId>,
    pub transcript: Transcript,
    pub summary: Summary,
    /// Human-readable wall-clock duration, e.g. "3m 12s"
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_feedback: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub agent_ratings: HashMap<AgentId, Rating>,
}

impl MeetingResult {
    pub fn new(
        goal: impl Into<String>,
        agent_ids: Vec<AgentId>,
        transcript: Transcript,
        summary: Summary,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            goal: goal.into(),
            agent_ids,
            transcript,
            summary,
            duration: duration.into(),
            user_feedback: None,
            agent_ratings: HashMap::new(),
        }
    }

    /// Attach the steering text supplied between meetings
    pub fn set_user_feedback(&mut self, feedback: impl Into<String>) {
        self.user_feedback = Some(feedback.into());
    }

    /// Record a thumbs-up/down rating for one participant
    pub fn rate_agent(&mut self, agent: AgentId, rating: Rating) {
        self.agent_ratings.insert(agent, rating);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> MeetingResult {
        MeetingResult::new(
            "Validate the market",
            vec![AgentId::new("product"), AgentId::new("vc")],
            Transcript::new(),
            Summary::default(),
            "42s",
        )
    }

    #[test]
    fn test_feedback_attachment() {
        let mut r = result();
        assert!(r.user_feedback.is_none());
        r.set_user_feedback("Focus on B2B next time");
        assert_eq!(r.user_feedback.as_deref(), Some("Focus on B2B next time"));
    }

    #[test]
    fn test_ratings_roundtrip() {
        let mut r = result();
        r.rate_agent(AgentId::new("vc"), Rating::Down);
        let json = serde_json::to_string(&r).unwrap();
        let back: MeetingResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.agent_ratings[&AgentId::new("vc")], Rating::Down);
    }

    #[test]
    fn test_absent_feedback_not_serialized() {
        let json = serde_json::to_value(result()).unwrap();
        assert!(json.get("userFeedback").is_none());
        assert!(json.get("agentRatings").is_none());
    }
}
