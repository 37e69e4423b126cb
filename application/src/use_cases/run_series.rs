//! Series controller: sequences meetings end-to-end
//!
//! Owns the [`Project`] aggregate and is its sole mutator. Drives each
//! meeting through the turn engine, pauses for user steering text
//! between meetings, triggers the final cross-meeting synthesis, and
//! persists a snapshot through the store port after every state
//! transition so an interrupted series can resume at the exact
//! mid-meeting position.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use roundtable_domain::{
    AgentId, AgentRegistry, DomainError, FinalSummary, ParseError, Project, ProjectStatus,
    PromptTemplate, Rating, RoundPhase, SeriesPhase, StateInconsistency, ResumePoint, Topic,
    PlannedMeeting, parse_json,
};
use serde_json::json;
use tracing::{info, warn};

use crate::config::BehaviorConfig;
use crate::generation::GenerationClient;
use crate::ports::event_logger::{EventLogger, OrchestrationEvent};
use crate::ports::generation::{GenerationBackend, GenerationError, GenerationRequest};
use crate::ports::progress::MeetingProgress;
use crate::ports::store::{ProjectStore, StoreError};
use crate::use_cases::run_meeting::{MeetingContext, MeetingEngine, StepOutcome, TurnError};

/// Errors surfaced while driving a series
#[derive(thiserror::Error, Debug)]
pub enum SeriesError {
    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Malformed(#[from] ParseError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Cannot resume: {0}")]
    ResumeInconsistency(#[from] StateInconsistency),

    #[error("Invalid operation for the current series state: {0}")]
    InvalidState(String),
}

/// What one `advance_turn` call accomplished, series-wide
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesEvent {
    /// One engine step committed; the meeting continues
    TurnProcessed,
    /// A meeting finished and steering input is now expected
    AwaitingUserInput { next_meeting: usize },
    /// The last meeting finished; final synthesis can run
    ReadyForFinalSynthesis,
}

/// Drives an ordered list of planned meetings through the turn engine,
/// one meeting at a time, one agent turn at a time.
pub struct SeriesController<B: GenerationBackend, S: ProjectStore> {
    client: Arc<GenerationClient<B>>,
    registry: Arc<AgentRegistry>,
    store: Arc<S>,
    config: BehaviorConfig,
    events: Arc<dyn EventLogger>,
    project: Project,
    phase: SeriesPhase,
    engine: Option<MeetingEngine<B>>,
}

impl<B: GenerationBackend, S: ProjectStore> std::fmt::Debug for SeriesController<B, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesController")
            .field("config", &self.config)
            .field("project", &self.project)
            .field("phase", &self.phase)
            .field("engine", &self.engine)
            .finish()
    }
}

impl<B: GenerationBackend, S: ProjectStore> SeriesController<B, S> {
    /// Create a project for an approved plan and set up its first meeting.
    pub async fn start(
        client: Arc<GenerationClient<B>>,
        registry: Arc<AgentRegistry>,
        store: Arc<S>,
        config: BehaviorConfig,
        events: Arc<dyn EventLogger>,
        topic: Topic,
        plan: Vec<PlannedMeeting>,
    ) -> Result<Self, SeriesError> {
        if plan.is_empty() {
            return Err(SeriesError::Domain(DomainError::EmptyPlan));
        }
        let now = Utc::now();
        let id = now.format("%Y%m%dT%H%M%S%.3fZ").to_string();
        let project = Project::new(id, topic, plan, now);

        let mut controller = Self {
            client,
            registry,
            store,
            config,
            events,
            project,
            phase: SeriesPhase::InMeeting,
            engine: None,
        };
        controller.setup_meeting(0).await?;
        Ok(controller)
    }

    /// Rebuild a controller from a stored project at its exact resume point.
    pub async fn resume(
        client: Arc<GenerationClient<B>>,
        registry: Arc<AgentRegistry>,
        store: Arc<S>,
        config: BehaviorConfig,
        events: Arc<dyn EventLogger>,
        project: Project,
    ) -> Result<Self, SeriesError> {
        let point = project.resume_point()?;

        let mut controller = Self {
            client,
            registry,
            store,
            config,
            events,
            project,
            phase: SeriesPhase::InMeeting,
            engine: None,
        };

        match point {
            ResumePoint::MidMeeting(index) => {
                let snapshot = controller.project.snapshot.clone().ok_or_else(|| {
                    SeriesError::InvalidState("mid-meeting resume without snapshot".to_string())
                })?;
                let context = controller.meeting_context(index);
                let roster = controller.project.meeting_plan[index].agent_ids.clone();
                controller.engine = Some(MeetingEngine::from_snapshot(
                    Arc::clone(&controller.client),
                    Arc::clone(&controller.registry),
                    controller.config.grounding,
                    context,
                    &roster,
                    snapshot,
                )?);
                info!(meeting = index, "resumed mid-meeting");
            }
            ResumePoint::NextMeeting(index) => {
                controller.setup_meeting(index).await?;
            }
            ResumePoint::FinalSynthesis => {
                controller.phase = SeriesPhase::FinalSynthesis;
            }
            ResumePoint::Done => {
                controller.phase = SeriesPhase::FinalComplete;
            }
        }

        Ok(controller)
    }

    pub fn phase(&self) -> SeriesPhase {
        self.phase
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Index of the meeting currently in progress or up next
    pub fn current_meeting_index(&self) -> usize {
        self.engine
            .as_ref()
            .map(|e| e.context().meeting_index)
            .unwrap_or_else(|| self.project.meeting_results.len())
    }

    /// Process one engine step and persist the transition.
    ///
    /// On failure nothing advances: the cursor stays on the failed
    /// agent/round and the next call retries exactly the same step.
    pub async fn advance_turn(
        &mut self,
        progress: &dyn MeetingProgress,
    ) -> Result<SeriesEvent, SeriesError> {
        if self.phase != SeriesPhase::InMeeting {
            return Err(SeriesError::InvalidState(
                "no meeting is in progress".to_string(),
            ));
        }
        let engine = self.engine.as_mut().ok_or_else(|| {
            SeriesError::InvalidState("meeting phase without an engine".to_string())
        })?;

        let outcome = engine.step(progress).await?;
        match outcome {
            StepOutcome::Complete(result) => {
                let index = self.project.meeting_results.len();
                self.events.log(OrchestrationEvent::new(
                    "meeting_complete",
                    json!({ "meeting": index, "duration": result.duration }),
                ));
                self.project.meeting_results.push(*result);
                self.project.snapshot = None;
                self.engine = None;

                let last = self.project.meeting_results.len() == self.project.meeting_plan.len();
                self.phase = if last {
                    SeriesPhase::FinalSynthesis
                } else {
                    SeriesPhase::AwaitingUserInput
                };
                self.save().await?;

                if last {
                    Ok(SeriesEvent::ReadyForFinalSynthesis)
                } else {
                    Ok(SeriesEvent::AwaitingUserInput {
                        next_meeting: self.project.meeting_results.len(),
                    })
                }
            }
            StepOutcome::TurnTaken { phase, agent, generated } => {
                self.events.log(OrchestrationEvent::new(
                    "turn_committed",
                    json!({
                        "phase": phase.label(),
                        "agent": agent.as_str(),
                        "generated": generated,
                    }),
                ));
                self.checkpoint().await?;
                Ok(SeriesEvent::TurnProcessed)
            }
            StepOutcome::PhaseAdvanced { from, to } => {
                self.events.log(OrchestrationEvent::new(
                    "phase_change",
                    json!({ "from": from.label(), "to": to.label() }),
                ));
                self.checkpoint().await?;
                Ok(SeriesEvent::TurnProcessed)
            }
        }
    }

    /// Drive the current meeting to completion, with the configured
    /// settling delay between turns.
    pub async fn run_meeting(
        &mut self,
        progress: &dyn MeetingProgress,
    ) -> Result<SeriesEvent, SeriesError> {
        if let Some(engine) = &self.engine {
            let ctx = engine.context();
            progress.on_meeting_start(
                ctx.meeting_index,
                ctx.total_meetings,
                &ctx.goal,
                engine.roster().len(),
            );
            if engine.phase() == RoundPhase::Round1 && engine.cursor() == 0 {
                progress.on_phase_start(RoundPhase::Round1, engine.roster().len());
            }
        }

        loop {
            let event = self.advance_turn(progress).await?;
            if event != SeriesEvent::TurnProcessed {
                return Ok(event);
            }
            if self.config.turn_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.turn_delay_ms)).await;
            }
        }
    }

    /// Attach steering text to the just-completed meeting and set up the
    /// next one. An empty string is a valid "no steering" answer.
    pub async fn provide_feedback(
        &mut self,
        feedback: impl Into<String>,
    ) -> Result<(), SeriesError> {
        if self.phase != SeriesPhase::AwaitingUserInput {
            return Err(SeriesError::InvalidState(
                "not waiting for user input".to_string(),
            ));
        }
        let feedback = feedback.into();
        if let Some(result) = self.project.meeting_results.last_mut() {
            if !feedback.trim().is_empty() {
                result.set_user_feedback(feedback);
            }
        }

        let next = self.project.meeting_results.len();
        self.setup_meeting(next).await
    }

    /// Fold all meeting summaries into the final executive report.
    pub async fn run_final_synthesis(
        &mut self,
        progress: &dyn MeetingProgress,
    ) -> Result<FinalSummary, SeriesError> {
        if self.phase != SeriesPhase::FinalSynthesis {
            return Err(SeriesError::InvalidState(
                "final synthesis is not due".to_string(),
            ));
        }
        progress.on_final_synthesis_start();
        info!("running final synthesis");

        let prompt = PromptTemplate::final_report(
            self.project.topic.content(),
            &self.project.meeting_results,
        );
        let output = self
            .client
            .generate(&GenerationRequest::json(prompt))
            .await?;
        let final_summary: FinalSummary = parse_json(&output.text, "Final Synthesis Agent")?;

        self.project.final_summary = Some(final_summary.clone());
        self.project.status = ProjectStatus::Completed;
        self.phase = SeriesPhase::FinalComplete;
        self.save().await?;
        self.events.log(OrchestrationEvent::new(
            "final_complete",
            json!({ "project": self.project.id }),
        ));

        Ok(final_summary)
    }

    /// Reset per-meeting state and enter Round 1 of `index`.
    async fn setup_meeting(&mut self, index: usize) -> Result<(), SeriesError> {
        if index >= self.project.meeting_plan.len() {
            return Err(SeriesError::Domain(DomainError::InvalidMeetingIndex(index)));
        }
        let context = self.meeting_context(index);
        let roster = self.project.meeting_plan[index].agent_ids.clone();

        let engine = MeetingEngine::new(
            Arc::clone(&self.client),
            Arc::clone(&self.registry),
            self.config.grounding,
            context,
            &roster,
            Utc::now(),
        )?;
        self.engine = Some(engine);
        self.phase = SeriesPhase::InMeeting;
        self.events.log(OrchestrationEvent::new(
            "meeting_started",
            json!({ "meeting": index }),
        ));
        self.checkpoint().await
    }

    /// Assemble the static context for meeting `index`, threading the
    /// previous meeting's summary and steering text.
    fn meeting_context(&self, index: usize) -> MeetingContext {
        let previous = index
            .checked_sub(1)
            .and_then(|i| self.project.meeting_results.get(i));
        MeetingContext {
            topic: self.project.topic.clone(),
            goal: self.project.meeting_plan[index].goal.clone(),
            meeting_index: index,
            total_meetings: self.project.meeting_plan.len(),
            previous_summary: previous.map(|r| r.summary.clone()),
            steering: previous.and_then(|r| r.user_feedback.clone()),
        }
    }

    /// Persist with the current engine snapshot attached.
    async fn checkpoint(&mut self) -> Result<(), SeriesError> {
        self.project.snapshot = self.engine.as_ref().map(|e| e.snapshot());
        self.save().await
    }

    async fn save(&mut self) -> Result<(), SeriesError> {
        self.project.touch(Utc::now());
        self.store.save(&self.project).await?;
        Ok(())
    }
}

/// Attach a per-agent rating to a stored, completed meeting.
///
/// Ratings arrive after the fact (possibly long after the series ended),
/// so this operates directly on the stored aggregate rather than through
/// a live controller.
pub async fn attach_rating<S: ProjectStore>(
    store: &S,
    project_id: &str,
    meeting_index: usize,
    agent: AgentId,
    rating: Rating,
) -> Result<(), SeriesError> {
    let mut project = store
        .load(project_id)
        .await?
        .ok_or_else(|| StoreError::NotFound(project_id.to_string()))?;

    let result = project
        .meeting_results
        .get_mut(meeting_index)
        .ok_or(DomainError::InvalidMeetingIndex(meeting_index))?;
    if !result.agent_ids.contains(&agent) {
        warn!(agent = %agent, "rating target was not a participant");
        return Err(SeriesError::Domain(DomainError::UnknownAgent(
            agent.to_string(),
        )));
    }
    result.rate_agent(agent, rating);

    project.touch(Utc::now());
    store.save(&project).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use roundtable_domain::Model;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    use crate::ports::event_logger::NoEventLogger;
    use crate::ports::generation::GenerationOutput;
    use crate::ports::progress::NoProgress;

    /// Backend scripted with queued outputs; records every prompt.
    struct ScriptedBackend {
        results: Mutex<VecDeque<Result<GenerationOutput, GenerationError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new() -> Self {
            Self {
                results: Mutex::new(VecDeque::new()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn push(&self, output: GenerationOutput) {
            self.results.lock().unwrap().push_back(Ok(output));
        }

        fn push_err(&self, error: GenerationError) {
            self.results.lock().unwrap().push_back(Err(error));
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerationBackend for ScriptedBackend {
        async fn generate(
            &self,
            _model: &Model,
            request: &GenerationRequest,
        ) -> Result<GenerationOutput, GenerationError> {
            self.prompts.lock().unwrap().push(request.prompt.clone());
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GenerationError::Backend("script exhausted".to_string())))
        }
    }

    /// In-memory store recording every saved revision.
    struct MemoryStore {
        projects: Mutex<HashMap<String, Project>>,
    }

    impl MemoryStore {
        fn new() -> Self {
            Self {
                projects: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl ProjectStore for MemoryStore {
        async fn save(&self, project: &Project) -> Result<(), StoreError> {
            self.projects
                .lock()
                .unwrap()
                .insert(project.id.clone(), project.clone());
            Ok(())
        }

        async fn load(&self, id: &str) -> Result<Option<Project>, StoreError> {
            Ok(self.projects.lock().unwrap().get(id).cloned())
        }

        async fn list(&self) -> Result<Vec<Project>, StoreError> {
            let mut all: Vec<Project> = self.projects.lock().unwrap().values().cloned().collect();
            all.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            Ok(all)
        }
    }

    fn no_question_round1(text: &str) -> GenerationOutput {
        GenerationOutput::text_only(format!(
            r#"{{"mainAnswer": "{text}", "crossQuestions": []}}"#
        ))
    }

    fn summary_output() -> GenerationOutput {
        GenerationOutput::text_only(
            r#"{"keyInsights": ["k"], "actionItems": ["a"], "potentialRisks": ["p"], "consensusPoints": ["c"]}"#,
        )
    }

    fn final_output() -> GenerationOutput {
        GenerationOutput::text_only(
            r#"{
                "executiveSummary": "The project moved from validation to launch planning.",
                "keyDecisionsAndPivots": ["niche-first positioning"],
                "finalActionPlan": ["build MVP"],
                "outstandingRisks": [],
                "projectConclusion": "Proceed with MVP development."
            }"#,
        )
    }

    fn two_meeting_plan() -> Vec<PlannedMeeting> {
        vec![
            PlannedMeeting::new("Validate the market", vec![AgentId::new("product")]),
            PlannedMeeting::new("Plan the launch", vec![AgentId::new("marketing")]),
        ]
    }

    fn config() -> BehaviorConfig {
        BehaviorConfig {
            turn_delay_ms: 0,
            ..BehaviorConfig::default()
        }
    }

    async fn controller(
        backend: &Arc<ScriptedBackend>,
        store: &Arc<MemoryStore>,
        plan: Vec<PlannedMeeting>,
    ) -> SeriesController<ScriptedBackend, MemoryStore> {
        SeriesController::start(
            Arc::new(GenerationClient::new(Arc::clone(backend), vec![])),
            Arc::new(AgentRegistry::builtin()),
            Arc::clone(store),
            config(),
            Arc::new(NoEventLogger),
            Topic::new("Launch a subscription coffee box").unwrap(),
            plan,
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_series_end_to_end_with_feedback() {
        let backend = Arc::new(ScriptedBackend::new());
        let store = Arc::new(MemoryStore::new());
        let mut controller = controller(&backend, &store, two_meeting_plan()).await;

        // Meeting 1: single agent, no questions, straight to synthesis
        backend.push(no_question_round1("product analysis"));
        backend.push(summary_output());
        let event = controller.run_meeting(&NoProgress).await.unwrap();
        assert_eq!(event, SeriesEvent::AwaitingUserInput { next_meeting: 1 });
        assert_eq!(controller.phase(), SeriesPhase::AwaitingUserInput);
        assert_eq!(controller.project().meeting_results.len(), 1);

        // Steering text attaches to meeting 1 and threads into meeting 2
        controller
            .provide_feedback("Focus on European markets")
            .await
            .unwrap();
        assert_eq!(
            controller.project().meeting_results[0]
                .user_feedback
                .as_deref(),
            Some("Focus on European markets")
        );

        backend.push(no_question_round1("marketing analysis"));
        backend.push(summary_output());
        let event = controller.run_meeting(&NoProgress).await.unwrap();
        assert_eq!(event, SeriesEvent::ReadyForFinalSynthesis);

        // Meeting 2's round-1 prompt carried the steering text and the
        // previous summary
        let prompts = backend.prompts();
        let meeting2_prompt = &prompts[2];
        assert!(meeting2_prompt.contains("User Direction: Focus on European markets"));
        assert!(meeting2_prompt.contains("This is a follow-up meeting"));

        // Final synthesis completes the project
        backend.push(final_output());
        let final_summary = controller.run_final_synthesis(&NoProgress).await.unwrap();
        assert_eq!(final_summary.project_conclusion, "Proceed with MVP development.");
        assert!(!final_summary.key_decisions_and_pivots.is_empty());
        assert_eq!(controller.phase(), SeriesPhase::FinalComplete);

        let stored = store.load(&controller.project().id).await.unwrap().unwrap();
        assert!(stored.is_completed());
        assert!(stored.snapshot.is_none());
        assert!(stored.final_summary.is_some());
    }

    #[tokio::test]
    async fn test_empty_feedback_is_not_recorded() {
        let backend = Arc::new(ScriptedBackend::new());
        let store = Arc::new(MemoryStore::new());
        let mut controller = controller(&backend, &store, two_meeting_plan()).await;

        backend.push(no_question_round1("analysis"));
        backend.push(summary_output());
        controller.run_meeting(&NoProgress).await.unwrap();
        controller.provide_feedback("   ").await.unwrap();

        assert!(controller.project().meeting_results[0].user_feedback.is_none());
        assert_eq!(controller.phase(), SeriesPhase::InMeeting);
    }

    #[tokio::test]
    async fn test_failed_turn_retries_same_step() {
        let backend = Arc::new(ScriptedBackend::new());
        let store = Arc::new(MemoryStore::new());
        let mut controller = controller(&backend, &store, two_meeting_plan()).await;

        backend.push_err(GenerationError::Timeout);
        let err = controller.advance_turn(&NoProgress).await.unwrap_err();
        assert!(matches!(
            err,
            SeriesError::Turn(TurnError::Generation(GenerationError::Timeout))
        ));

        // Retry succeeds and the meeting continues normally
        backend.push(no_question_round1("recovered analysis"));
        let event = controller.advance_turn(&NoProgress).await.unwrap();
        assert_eq!(event, SeriesEvent::TurnProcessed);
    }

    #[tokio::test]
    async fn test_resume_mid_meeting_from_store() {
        let backend = Arc::new(ScriptedBackend::new());
        let store = Arc::new(MemoryStore::new());
        let plan = vec![PlannedMeeting::new(
            "Validate the market",
            vec![AgentId::new("product"), AgentId::new("tech")],
        )];
        let mut controller = controller(&backend, &store, plan).await;

        // One round-1 turn, then drop the controller (simulated crash)
        backend.push(no_question_round1("product analysis"));
        controller.advance_turn(&NoProgress).await.unwrap();
        let id = controller.project().id.clone();
        drop(controller);

        let stored = store.load(&id).await.unwrap().unwrap();
        assert!(stored.snapshot.is_some());

        let mut resumed = SeriesController::resume(
            Arc::new(GenerationClient::new(Arc::clone(&backend), vec![])),
            Arc::new(AgentRegistry::builtin()),
            Arc::clone(&store),
            config(),
            Arc::new(NoEventLogger),
            stored,
        )
        .await
        .unwrap();
        assert_eq!(resumed.phase(), SeriesPhase::InMeeting);

        // Continue: tech's round-1 turn, transition, synthesis
        backend.push(no_question_round1("tech analysis"));
        backend.push(summary_output());
        let event = resumed.run_meeting(&NoProgress).await.unwrap();
        assert_eq!(event, SeriesEvent::ReadyForFinalSynthesis);

        let result = &resumed.project().meeting_results[0];
        let responses: Vec<_> = result
            .transcript
            .iter()
            .filter_map(|i| match i {
                roundtable_domain::TranscriptItem::Response { agent, .. } => Some(agent.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            responses,
            vec![AgentId::new("product"), AgentId::new("tech")]
        );
    }

    #[tokio::test]
    async fn test_resume_rejects_inconsistent_project() {
        let backend = Arc::new(ScriptedBackend::new());
        let store = Arc::new(MemoryStore::new());
        let broken = Project::new(
            "broken",
            Topic::new("coffee").unwrap(),
            vec![],
            Utc::now(),
        );

        let err = SeriesController::resume(
            Arc::new(GenerationClient::new(backend, vec![])),
            Arc::new(AgentRegistry::builtin()),
            store,
            config(),
            Arc::new(NoEventLogger),
            broken,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SeriesError::ResumeInconsistency(_)));
    }

    #[tokio::test]
    async fn test_feedback_outside_pause_is_invalid() {
        let backend = Arc::new(ScriptedBackend::new());
        let store = Arc::new(MemoryStore::new());
        let mut controller = controller(&backend, &store, two_meeting_plan()).await;

        let err = controller.provide_feedback("too early").await.unwrap_err();
        assert!(matches!(err, SeriesError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_attach_rating_to_stored_meeting() {
        let backend = Arc::new(ScriptedBackend::new());
        let store = Arc::new(MemoryStore::new());
        let plan = vec![PlannedMeeting::new(
            "Validate the market",
            vec![AgentId::new("product")],
        )];
        let mut controller = controller(&backend, &store, plan).await;

        backend.push(no_question_round1("analysis"));
        backend.push(summary_output());
        controller.run_meeting(&NoProgress).await.unwrap();
        let id = controller.project().id.clone();

        attach_rating(&*store, &id, 0, AgentId::new("product"), Rating::Up)
            .await
            .unwrap();
        let stored = store.load(&id).await.unwrap().unwrap();
        assert_eq!(
            stored.meeting_results[0].agent_ratings[&AgentId::new("product")],
            Rating::Up
        );

        // Rating a non-participant fails
        let err = attach_rating(&*store, &id, 0, AgentId::new("vc"), Rating::Down)
            .await
            .unwrap_err();
        assert!(matches!(err, SeriesError::Domain(DomainError::UnknownAgent(_))));
    }
}
