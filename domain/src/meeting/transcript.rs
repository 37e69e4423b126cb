//! Append-only meeting transcript
//!
//! Append order is the canonical ordering for synthesis and display;
//! items are never reordered or deleted. Agents are referenced by id
//! and resolved against the registry for rendering.

use serde::{Deserialize, Serialize};

use crate::agent::{AgentId, AgentRegistry};
use crate::meeting::rounds::Source;

/// One entry in a meeting transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TranscriptItem {
    /// Orchestration notes: round markers, skip notices, completion markers
    System { content: String },
    /// An agent's round-1 main answer
    Response {
        agent: AgentId,
        content: String,
        #[serde(default)]
        sources: Vec<Source>,
    },
    /// A cross-question routed between two participants
    Question {
        from: AgentId,
        to: AgentId,
        content: String,
    },
    /// A follow-up or final answer
    Answer {
        agent: AgentId,
        content: String,
        #[serde(default)]
        sources: Vec<Source>,
    },
}

impl TranscriptItem {
    pub fn system(content: impl Into<String>) -> Self {
        TranscriptItem::System {
            content: content.into(),
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, TranscriptItem::System { .. })
    }
}

/// Ordered, append-only sequence of transcript items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    items: Vec<TranscriptItem>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: TranscriptItem) {
        self.items.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = TranscriptItem>) {
        self.items.extend(items);
    }

    pub fn items(&self) -> &[TranscriptItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TranscriptItem> {
        self.items.iter()
    }

    /// Condensed text for the synthesizer: responses and answers only.
    ///
    /// System and question items are process noise for a summarizer and
    /// are excluded. Unresolvable ids render as the raw id rather than
    /// dropping content.
    pub fn condensed(&self, registry: &AgentRegistry) -> String {
        let name = |id: &AgentId| -> String {
            registry
                .get(id)
                .map(|a| a.name.clone())
                .unwrap_or_else(|| id.to_string())
        };

        self.items
            .iter()
            .filter_map(|item| match item {
                TranscriptItem::Response { agent, content, .. }
                | TranscriptItem::Answer { agent, content, .. } => {
                    Some(format!("[{}] {}", name(agent), content))
                }
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl IntoIterator for Transcript {
    type Item = TranscriptItem;
    type IntoIter = std::vec::IntoIter<TranscriptItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a TranscriptItem;
    type IntoIter = std::slice::Iter<'a, TranscriptItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
