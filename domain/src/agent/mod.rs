//! Agent personas and the static registry

pub mod registry;

use serde::{Deserialize, Serialize};

pub use registry::AgentRegistry;

/// Unique identifier of an agent persona (Value Object)
///
/// Transcripts and persisted state reference agents by id only; the
/// persona text lives exclusively in the registry and is re-resolved
/// on load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        AgentId::new(s)
    }
}

/// An expert persona participating in meetings (Entity)
///
/// Agents are immutable and defined once at process start by the
/// registry. The `persona` field carries the full response-framework
/// instructions embedded into generation prompts; `short_persona` is
/// the one-line description shown to the planner and in listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub short_persona: String,
    pub persona: String,
}

impl Agent {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        short_persona: impl Into<String>,
        persona: impl Into<String>,
    ) -> Self {
        Self {
            id: AgentId::new(id),
            name: name.into(),
            short_persona: short_persona.into(),
            persona: persona.into(),
        }
    }
}
