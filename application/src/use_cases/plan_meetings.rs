//! Meeting planner use case
//!
//! Decomposes a topic into an ordered sequence of meeting goals, each
//! staffed with a small expert subset drawn from the registry.

use std::sync::Arc;

use roundtable_domain::{
    AgentRegistry, DomainError, ParseError, PlannedMeeting, PromptTemplate, Topic, parse_json,
    sanitize_plan,
};
use tracing::info;

use crate::generation::GenerationClient;
use crate::ports::generation::{GenerationBackend, GenerationError, GenerationRequest};

/// Errors that abort project creation
#[derive(thiserror::Error, Debug)]
pub enum PlanningError {
    #[error("Planning failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Planning failed: {0}")]
    Malformed(#[from] ParseError),

    #[error("Planning failed: {0}")]
    InvalidPlan(#[from] DomainError),
}

/// Use case producing the meeting plan for a topic
pub struct PlanMeetingsUseCase<B: GenerationBackend> {
    client: Arc<GenerationClient<B>>,
    registry: Arc<AgentRegistry>,
}

impl<B: GenerationBackend> PlanMeetingsUseCase<B> {
    pub fn new(client: Arc<GenerationClient<B>>, registry: Arc<AgentRegistry>) -> Self {
        Self { client, registry }
    }

    /// Plan the meeting series for `topic`.
    ///
    /// The returned plan is already sanitized: unknown agent ids are
    /// dropped, meetings are capped at three participants, and the plan
    /// is capped at four meetings. An empty surviving plan is an error.
    pub async fn execute(&self, topic: &Topic) -> Result<Vec<PlannedMeeting>, PlanningError> {
        let prompt = PromptTemplate::plan(topic.content(), self.registry.all());
        let output = self
            .client
            .generate(&GenerationRequest::json(prompt))
            .await?;

        let raw: Vec<PlannedMeeting> = parse_json(&output.text, "Planning Agent")?;
        let plan = sanitize_plan(raw, &self.registry)?;

        info!(meetings = plan.len(), "meeting plan ready");
        Ok(plan)
    }
}
