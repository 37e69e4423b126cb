//! Per-round result records and the per-meeting round state
//!
//! The three round shapes mirror the JSON contract the generation
//! backend is instructed to produce. All array fields default to empty
//! so a partially-shaped response never breaks transcript building.
//! `Round3Result` deliberately has no cross-question field: the final
//! round cannot extend the discussion.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::agent::AgentId;

/// A web-grounding citation attached to a generated answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

/// A question one agent directs at another participant, by display name
///
/// The name-based addressing is part of the generation contract; it is
/// resolved to an [`AgentId`] the moment a turn is recorded, and targets
/// that match no participant are silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossQuestion {
    pub ask_expert: String,
    pub question: String,
}

/// A question/answer pair from a follow-up round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question: String,
    pub answer: String,
}

/// Round 1: main analysis plus optional cross-questions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round1Result {
    #[serde(default)]
    pub main_answer: String,
    #[serde(default)]
    pub cross_questions: Vec<CrossQuestion>,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// Round 2: answers to round-1 questions plus optional follow-ups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round2Result {
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub cross_questions: Vec<CrossQuestion>,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// Round 3: final answers only — no further questions permitted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Round3Result {
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// Per-meeting round state: one slot per participant per round
///
/// Invariant: once a round completes, every agent on the roster has
/// exactly one entry (possibly the default) in that round's map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetingData {
    #[serde(default)]
    pub round1: HashMap<AgentId, Round1Result>,
    #[serde(default)]
    pub round2: HashMap<AgentId, Round2Result>,
    #[serde(default)]
    pub round3: HashMap<AgentId, Round3Result>,
}

impl MeetingData {
    /// Seed one default slot per agent per round
    pub fn for_agents<'a>(roster: impl IntoIterator<Item = &'a AgentId>) -> Self {
        let mut data = MeetingData::default();
        for id in roster {
            data.round1.insert(id.clone(), Round1Result::default());
            data.round2.insert(id.clone(), Round2Result::default());
            data.round3.insert(id.clone(), Round3Result::default());
        }
        data
    }

    /// True if any round-1 result raised at least one cross-question
    pub fn has_round1_questions(&self) -> bool {
        self.round1.values().any(|r| !r.cross_questions.is_empty())
    }

    /// True if any round-2 result raised at least one cross-question
    pub fn has_round2_questions(&self) -> bool {
        self.round2.values().any(|r| !r.cross_questions.is_empty())
    }

    /// All round-1 questions addressed to `name`, in stable roster-independent order
    pub fn round1_questions_for(&self, name: &str) -> Vec<String> {
        let mut out: Vec<(&AgentId, &CrossQuestion)> = self
            .round1
            .iter()
            .flat_map(|(id, r)| r.cross_questions.iter().map(move |q| (id, q)))
            .filter(|(_, q)| q.ask_expert == name)
            .collect();
        out.sort_by(|(a, _), (b, _)| a.cmp(b));
        out.into_iter().map(|(_, q)| q.question.clone()).collect()
    }

    /// All round-2 questions addressed to `name`
    pub fn round2_questions_for(&self, name: &str) -> Vec<String> {
        let mut out: Vec<(&AgentId, &CrossQuestion)> = self
            .round2
            .iter()
            .flat_map(|(id, r)| r.cross_questions.iter().map(move |q| (id, q)))
            .filter(|(_, q)| q.ask_expert == name)
            .collect();
        out.sort_by(|(a, _), (b, _)| a.cmp(b));
        out.into_iter().map(|(_, q)| q.question.clone()).collect()
    }
}
