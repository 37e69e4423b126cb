//! Turn engine: drives one meeting through its rounds and synthesis
//!
//! The engine is a state machine over [`RoundPhase`] with a secondary
//! cursor tracking whose turn is next within the current round. Each
//! [`MeetingEngine::step`] call performs exactly one unit of work: one
//! agent turn, one phase transition, or the synthesis pass.
//!
//! Failure semantics: a turn buffers all of its transcript items and
//! state mutations until the generation call and parse both succeed, so
//! an error leaves the engine exactly where it was — re-invoking `step`
//! retries the same agent's same-round turn.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use roundtable_domain::{
    Agent, AgentId, AgentRegistry, DomainError, MeetingData, MeetingResult, MeetingSnapshot,
    ParseError, PromptTemplate, Round1Result, Round2Result, Round3Result, RoundPhase, Summary,
    Topic, Transcript, TranscriptItem, format_duration, parse_json,
};
use tracing::{debug, info};

use crate::generation::GenerationClient;
use crate::ports::generation::{GenerationBackend, GenerationError, GenerationRequest};
use crate::ports::progress::MeetingProgress;

/// Errors that abort a single turn, leaving the engine resumable
#[derive(thiserror::Error, Debug)]
pub enum TurnError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Malformed(#[from] ParseError),

    #[error("Meeting is already complete")]
    AlreadyComplete,
}

/// What a single `step` call accomplished
#[derive(Debug)]
pub enum StepOutcome {
    /// One agent's turn committed; `generated` is false when the agent
    /// had no questions and the backend was not called
    TurnTaken {
        phase: RoundPhase,
        agent: AgentId,
        generated: bool,
    },
    /// The round cursor was exhausted and the engine moved on
    PhaseAdvanced { from: RoundPhase, to: RoundPhase },
    /// Synthesis finished; the meeting result is final
    Complete(Box<MeetingResult>),
}

/// Static context a meeting runs inside
#[derive(Debug, Clone)]
pub struct MeetingContext {
    pub topic: Topic,
    pub goal: String,
    pub meeting_index: usize,
    pub total_meetings: usize,
    /// Summary of the previous meeting, threaded into Round-1 prompts
    pub previous_summary: Option<Summary>,
    /// User steering text carried over from the previous meeting
    pub steering: Option<String>,
}

/// State machine driving one meeting
pub struct MeetingEngine<B: GenerationBackend> {
    client: Arc<GenerationClient<B>>,
    registry: Arc<AgentRegistry>,
    grounding: bool,
    context: MeetingContext,
    /// Participants in planner order; this order is the turn order of
    /// every round and is never re-sorted
    roster: Vec<Agent>,
    phase: RoundPhase,
    cursor: usize,
    data: MeetingData,
    transcript: Transcript,
    started_at: DateTime<Utc>,
}

impl<B: GenerationBackend> std::fmt::Debug for MeetingEngine<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeetingEngine")
            .field("grounding", &self.grounding)
            .field("context", &self.context)
            .field("roster", &self.roster)
            .field("phase", &self.phase)
            .field("cursor", &self.cursor)
            .field("data", &self.data)
            .field("transcript", &self.transcript)
            .field("started_at", &self.started_at)
            .finish()
    }
}

impl<B: GenerationBackend> MeetingEngine<B> {
    /// Start a fresh meeting: seeded transcript, empty round state,
    /// cursor at the first agent.
    pub fn new(
        client: Arc<GenerationClient<B>>,
        registry: Arc<AgentRegistry>,
        grounding: bool,
        context: MeetingContext,
        roster_ids: &[AgentId],
        started_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let roster = Self::resolve_roster(&registry, roster_ids)?;

        let mut transcript = Transcript::new();
        transcript.push(TranscriptItem::system(format!(
            "Meeting {}/{} starting. Goal: \"{}\"",
            context.meeting_index + 1,
            context.total_meetings,
            context.goal
        )));

        let data = MeetingData::for_agents(roster.iter().map(|a| &a.id));

        Ok(Self {
            client,
            registry,
            grounding,
            context,
            roster,
            phase: RoundPhase::Round1,
            cursor: 0,
            data,
            transcript,
            started_at,
        })
    }

    /// Reconstruct an engine from a stored snapshot, mid-meeting.
    pub fn from_snapshot(
        client: Arc<GenerationClient<B>>,
        registry: Arc<AgentRegistry>,
        grounding: bool,
        context: MeetingContext,
        roster_ids: &[AgentId],
        snapshot: MeetingSnapshot,
    ) -> Result<Self, DomainError> {
        let roster = Self::resolve_roster(&registry, roster_ids)?;

        Ok(Self {
            client,
            registry,
            grounding,
            context,
            roster,
            phase: snapshot.phase,
            cursor: snapshot.agent_cursor,
            data: snapshot.meeting_data,
            transcript: snapshot.transcript,
            started_at: snapshot.started_at,
        })
    }

    fn resolve_roster(
        registry: &AgentRegistry,
        roster_ids: &[AgentId],
    ) -> Result<Vec<Agent>, DomainError> {
        if roster_ids.is_empty() {
            return Err(DomainError::EmptyRoster);
        }
        roster_ids
            .iter()
            .map(|id| {
                registry
                    .get(id)
                    .cloned()
                    .ok_or_else(|| DomainError::UnknownAgent(id.to_string()))
            })
            .collect()
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn context(&self) -> &MeetingContext {
        &self.context
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn roster(&self) -> &[Agent] {
        &self.roster
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn data(&self) -> &MeetingData {
        &self.data
    }

    pub fn is_complete(&self) -> bool {
        self.phase == RoundPhase::Complete
    }

    /// Serializable snapshot of the exact engine position
    pub fn snapshot(&self) -> MeetingSnapshot {
        MeetingSnapshot {
            phase: self.phase,
            meeting_index: self.context.meeting_index,
            agent_cursor: self.cursor,
            meeting_data: self.data.clone(),
            transcript: self.transcript.clone(),
            started_at: self.started_at,
        }
    }

    /// Perform exactly one turn, transition, or synthesis pass.
    pub async fn step(
        &mut self,
        progress: &dyn MeetingProgress,
    ) -> Result<StepOutcome, TurnError> {
        let roster_len = self.roster.len();
        match self.phase {
            RoundPhase::Round1 if self.cursor < roster_len => self.round1_turn(progress).await,
            RoundPhase::Round1 => Ok(self.leave_round1(progress)),
            RoundPhase::Round2 if self.cursor < roster_len => self.round2_turn(progress).await,
            RoundPhase::Round2 => Ok(self.leave_round2(progress)),
            RoundPhase::Round3 if self.cursor < roster_len => self.round3_turn(progress).await,
            RoundPhase::Round3 => Ok(self.leave_round3(progress)),
            RoundPhase::Synthesis => self.synthesize(progress).await,
            RoundPhase::Complete => Err(TurnError::AlreadyComplete),
        }
    }

    async fn round1_turn(
        &mut self,
        progress: &dyn MeetingProgress,
    ) -> Result<StepOutcome, TurnError> {
        let agent = self.roster[self.cursor].clone();
        progress.on_turn_start(RoundPhase::Round1, &agent);
        debug!(agent = %agent.id, "round 1 turn");

        let others: Vec<&Agent> = self.roster.iter().filter(|a| a.id != agent.id).collect();
        let prompt = PromptTemplate::round1(
            &agent,
            self.context.topic.content(),
            &self.context.goal,
            &others,
            self.context.previous_summary.as_ref(),
            self.context.steering.as_deref(),
        );

        let output = self.client.generate(&self.discussion_request(prompt)).await?;
        let mut result: Round1Result = parse_json(&output.text, &agent.name)?;
        result.sources = output.sources;

        // Resolve cross-question targets to participants of this meeting
        // right away; unmatched names are dropped without error.
        let mut items = vec![
            TranscriptItem::system(format!("Round 1: {}'s turn...", agent.name)),
            TranscriptItem::Response {
                agent: agent.id.clone(),
                content: format!("Main Answer: {}", result.main_answer),
                sources: result.sources.clone(),
            },
        ];
        let from = agent.id.clone();
        let roster = &self.roster;
        result.cross_questions.retain(|q| {
            match roster.iter().find(|a| a.name == q.ask_expert) {
                Some(target) => {
                    items.push(TranscriptItem::Question {
                        from: from.clone(),
                        to: target.id.clone(),
                        content: q.question.clone(),
                    });
                    true
                }
                None => false,
            }
        });

        self.data.round1.insert(agent.id.clone(), result);
        self.transcript.extend(items);
        self.cursor += 1;
        progress.on_turn_complete(RoundPhase::Round1, &agent, true);

        Ok(StepOutcome::TurnTaken {
            phase: RoundPhase::Round1,
            agent: agent.id,
            generated: true,
        })
    }

    async fn round2_turn(
        &mut self,
        progress: &dyn MeetingProgress,
    ) -> Result<StepOutcome, TurnError> {
        let agent = self.roster[self.cursor].clone();
        progress.on_turn_start(RoundPhase::Round2, &agent);

        let questions = self.data.round1_questions_for(&agent.name);
        if questions.is_empty() {
            self.transcript.extend([
                TranscriptItem::system(format!("Round 2: {}'s turn...", agent.name)),
                TranscriptItem::system(format!("{} had no questions to answer.", agent.name)),
            ]);
            self.cursor += 1;
            progress.on_turn_complete(RoundPhase::Round2, &agent, false);
            return Ok(StepOutcome::TurnTaken {
                phase: RoundPhase::Round2,
                agent: agent.id,
                generated: false,
            });
        }

        debug!(agent = %agent.id, questions = questions.len(), "round 2 turn");
        let others: Vec<&Agent> = self.roster.iter().filter(|a| a.id != agent.id).collect();
        let prompt = PromptTemplate::round2(&agent, self.context.topic.content(), &questions, &others);

        let output = self.client.generate(&self.discussion_request(prompt)).await?;
        let mut result: Round2Result = parse_json(&output.text, &agent.name)?;
        result.sources = output.sources;

        let mut items = vec![TranscriptItem::system(format!(
            "Round 2: {}'s turn...",
            agent.name
        ))];
        for (i, answer) in result.answers.iter().enumerate() {
            items.push(TranscriptItem::Answer {
                agent: agent.id.clone(),
                content: format!("Answered: \"{}\" with \"{}\"", answer.question, answer.answer),
                // Only the first answer of the batch carries the source
                // list; they all came from the same call.
                sources: if i == 0 {
                    result.sources.clone()
                } else {
                    Vec::new()
                },
            });
        }
        let from = agent.id.clone();
        let roster = &self.roster;
        result.cross_questions.retain(|q| {
            match roster.iter().find(|a| a.name == q.ask_expert) {
                Some(target) => {
                    items.push(TranscriptItem::Question {
                        from: from.clone(),
                        to: target.id.clone(),
                        content: q.question.clone(),
                    });
                    true
                }
                None => false,
            }
        });

        self.data.round2.insert(agent.id.clone(), result);
        self.transcript.extend(items);
        self.cursor += 1;
        progress.on_turn_complete(RoundPhase::Round2, &agent, true);

        Ok(StepOutcome::TurnTaken {
            phase: RoundPhase::Round2,
            agent: agent.id,
            generated: true,
        })
    }

    async fn round3_turn(
        &mut self,
        progress: &dyn MeetingProgress,
    ) -> Result<StepOutcome, TurnError> {
        let agent = self.roster[self.cursor].clone();
        progress.on_turn_start(RoundPhase::Round3, &agent);

        let questions = self.data.round2_questions_for(&agent.name);
        if questions.is_empty() {
            self.transcript.extend([
                TranscriptItem::system(format!("Round 3: {}'s turn...", agent.name)),
                TranscriptItem::system(format!("{} had no new questions to answer.", agent.name)),
            ]);
            self.cursor += 1;
            progress.on_turn_complete(RoundPhase::Round3, &agent, false);
            return Ok(StepOutcome::TurnTaken {
                phase: RoundPhase::Round3,
                agent: agent.id,
                generated: false,
            });
        }

        debug!(agent = %agent.id, questions = questions.len(), "round 3 turn");
        let prompt = PromptTemplate::round3(&agent, self.context.topic.content(), &questions);

        // Final answers only: no grounding, no new questions by contract.
        let output = self.client.generate(&GenerationRequest::json(prompt)).await?;
        let result: Round3Result = parse_json(&output.text, &agent.name)?;

        let mut items = vec![TranscriptItem::system(format!(
            "Round 3: {}'s turn...",
            agent.name
        ))];
        for answer in &result.answers {
            items.push(TranscriptItem::Answer {
                agent: agent.id.clone(),
                content: format!(
                    "Final Answer: \"{}\" with \"{}\"",
                    answer.question, answer.answer
                ),
                sources: Vec::new(),
            });
        }

        self.data.round3.insert(agent.id.clone(), result);
        self.transcript.extend(items);
        self.cursor += 1;
        progress.on_turn_complete(RoundPhase::Round3, &agent, true);

        Ok(StepOutcome::TurnTaken {
            phase: RoundPhase::Round3,
            agent: agent.id,
            generated: true,
        })
    }

    fn leave_round1(&mut self, progress: &dyn MeetingProgress) -> StepOutcome {
        progress.on_phase_complete(RoundPhase::Round1);
        let to = if self.data.has_round1_questions() {
            self.transcript
                .push(TranscriptItem::system("Round 1 complete. Starting Round 2."));
            self.cursor = 0;
            progress.on_phase_start(RoundPhase::Round2, self.roster.len());
            RoundPhase::Round2
        } else {
            self.transcript.push(TranscriptItem::system(
                "Round 1 complete. No new questions raised. Proceeding to summary.",
            ));
            RoundPhase::Synthesis
        };
        info!(from = %RoundPhase::Round1, %to, "phase transition");
        self.phase = to;
        StepOutcome::PhaseAdvanced {
            from: RoundPhase::Round1,
            to,
        }
    }

    fn leave_round2(&mut self, progress: &dyn MeetingProgress) -> StepOutcome {
        progress.on_phase_complete(RoundPhase::Round2);
        let to = if self.data.has_round2_questions() {
            self.transcript
                .push(TranscriptItem::system("Round 2 complete. Starting Round 3."));
            self.cursor = 0;
            progress.on_phase_start(RoundPhase::Round3, self.roster.len());
            RoundPhase::Round3
        } else {
            self.transcript.push(TranscriptItem::system(
                "Round 2 complete. No new questions raised. Proceeding to summary.",
            ));
            RoundPhase::Synthesis
        };
        info!(from = %RoundPhase::Round2, %to, "phase transition");
        self.phase = to;
        StepOutcome::PhaseAdvanced {
            from: RoundPhase::Round2,
            to,
        }
    }

    fn leave_round3(&mut self, progress: &dyn MeetingProgress) -> StepOutcome {
        progress.on_phase_complete(RoundPhase::Round3);
        self.transcript.push(TranscriptItem::system(
            "Round 3 complete. Synthesizing meeting summary...",
        ));
        self.phase = RoundPhase::Synthesis;
        StepOutcome::PhaseAdvanced {
            from: RoundPhase::Round3,
            to: RoundPhase::Synthesis,
        }
    }

    async fn synthesize(
        &mut self,
        progress: &dyn MeetingProgress,
    ) -> Result<StepOutcome, TurnError> {
        progress.on_phase_start(RoundPhase::Synthesis, 1);
        let participants: Vec<&Agent> = self.roster.iter().collect();
        let condensed = self.transcript.condensed(&self.registry);
        let prompt = PromptTemplate::meeting_synthesis(
            self.context.topic.content(),
            &self.context.goal,
            &participants,
            &condensed,
        );

        let output = self.client.generate(&GenerationRequest::json(prompt)).await?;
        let summary: Summary = parse_json(&output.text, "Synthesis Agent")?;

        let duration =
            format_duration((Utc::now() - self.started_at).num_seconds());

        self.transcript.push(TranscriptItem::system("Synthesis complete."));
        let result = MeetingResult::new(
            self.context.goal.clone(),
            self.roster.iter().map(|a| a.id.clone()).collect(),
            self.transcript.clone(),
            summary,
            duration.clone(),
        );
        // The live transcript gets the closing marker; the stored result
        // ends at "Synthesis complete." as displayed during the meeting.
        self.transcript
            .push(TranscriptItem::system("Meeting summary complete."));

        self.phase = RoundPhase::Complete;
        progress.on_phase_complete(RoundPhase::Synthesis);
        progress.on_meeting_complete(self.context.meeting_index, &duration);
        info!(meeting = self.context.meeting_index, %duration, "meeting complete");

        Ok(StepOutcome::Complete(Box::new(result)))
    }

    fn discussion_request(&self, prompt: String) -> GenerationRequest {
        GenerationRequest {
            prompt,
            grounding: self.grounding,
            json: !self.grounding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use roundtable_domain::Source;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::ports::generation::GenerationOutput;
    use crate::ports::progress::NoProgress;

    struct ScriptedBackend {
        results: Mutex<VecDeque<Result<GenerationOutput, GenerationError>>>,
    }

    impl ScriptedBackend {
        fn new(results: Vec<Result<GenerationOutput, GenerationError>>) -> Self {
            Self {
                results: Mutex::new(VecDeque::from(results)),
            }
        }

        fn push(&self, result: Result<GenerationOutput, GenerationError>) {
            self.results.lock().unwrap().push_back(result);
        }
    }

    #[async_trait]
    impl GenerationBackend for ScriptedBackend {
        async fn generate(
            &self,
            _model: &roundtable_domain::Model,
            _request: &GenerationRequest,
        ) -> Result<GenerationOutput, GenerationError> {
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GenerationError::Backend("script exhausted".to_string())))
        }
    }

    fn context() -> MeetingContext {
        MeetingContext {
            topic: Topic::new("Launch a subscription coffee box").unwrap(),
            goal: "Validate the market".to_string(),
            meeting_index: 0,
            total_meetings: 1,
            previous_summary: None,
            steering: None,
        }
    }

    fn engine_with(
        backend: Arc<ScriptedBackend>,
        roster: &[&str],
    ) -> MeetingEngine<ScriptedBackend> {
        let client = Arc::new(GenerationClient::new(backend, vec![]));
        let ids: Vec<AgentId> = roster.iter().map(|s| AgentId::new(*s)).collect();
        MeetingEngine::new(
            client,
            Arc::new(AgentRegistry::builtin()),
            true,
            context(),
            &ids,
            Utc::now(),
        )
        .unwrap()
    }

    fn r1(main: &str, questions: &[(&str, &str)]) -> GenerationOutput {
        let qs = questions
            .iter()
            .map(|(target, q)| format!(r#"{{"ask_expert": "{target}", "question": "{q}"}}"#))
            .collect::<Vec<_>>()
            .join(", ");
        GenerationOutput::text_only(format!(
            r#"{{"mainAnswer": "{main}", "crossQuestions": [{qs}]}}"#
        ))
    }

    fn r2(answers: &[(&str, &str)], questions: &[(&str, &str)]) -> GenerationOutput {
        let ans = answers
            .iter()
            .map(|(q, a)| format!(r#"{{"question": "{q}", "answer": "{a}"}}"#))
            .collect::<Vec<_>>()
            .join(", ");
        let qs = questions
            .iter()
            .map(|(target, q)| format!(r#"{{"ask_expert": "{target}", "question": "{q}"}}"#))
            .collect::<Vec<_>>()
            .join(", ");
        GenerationOutput::text_only(format!(
            r#"{{"answers": [{ans}], "crossQuestions": [{qs}]}}"#
        ))
    }

    fn summary_output() -> GenerationOutput {
        GenerationOutput::text_only(
            r#"{"keyInsights": ["i"], "actionItems": ["a"], "potentialRisks": ["r"], "consensusPoints": ["c"]}"#,
        )
    }

    fn count_responses(transcript: &Transcript) -> usize {
        transcript
            .iter()
            .filter(|i| matches!(i, TranscriptItem::Response { .. }))
            .count()
    }

    fn count_answers(transcript: &Transcript) -> usize {
        transcript
            .iter()
            .filter(|i| matches!(i, TranscriptItem::Answer { .. }))
            .count()
    }

    async fn drive_to_completion(
        engine: &mut MeetingEngine<ScriptedBackend>,
    ) -> MeetingResult {
        loop {
            match engine.step(&NoProgress).await.unwrap() {
                StepOutcome::Complete(result) => return *result,
                _ => continue,
            }
        }
    }

    #[tokio::test]
    async fn test_round1_records_one_response_per_agent() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Ok(r1("product view", &[])),
            Ok(r1("tech view", &[])),
        ]));
        let mut engine = engine_with(backend, &["product", "tech"]);

        engine.step(&NoProgress).await.unwrap();
        engine.step(&NoProgress).await.unwrap();

        assert_eq!(engine.cursor(), 2);
        assert_eq!(count_responses(engine.transcript()), 2);
        assert!(engine.transcript().len() >= engine.roster().len());
    }

    #[tokio::test]
    async fn test_round2_entered_iff_question_resolves() {
        // Resolvable question: Product Manager asks Tech Lead
        let backend = Arc::new(ScriptedBackend::new(vec![
            Ok(r1("view", &[("Tech Lead", "How long?")])),
            Ok(r1("view", &[])),
        ]));
        let mut engine = engine_with(backend, &["product", "tech"]);
        engine.step(&NoProgress).await.unwrap();
        engine.step(&NoProgress).await.unwrap();
        let outcome = engine.step(&NoProgress).await.unwrap();
        assert!(matches!(
            outcome,
            StepOutcome::PhaseAdvanced { to: RoundPhase::Round2, .. }
        ));
    }

    #[tokio::test]
    async fn test_unresolvable_question_skips_round2() {
        // Question aimed at a non-participant name must be dropped and
        // the engine must go straight to synthesis.
        let backend = Arc::new(ScriptedBackend::new(vec![
            Ok(r1("view", &[("CISO", "Is it secure?")])),
            Ok(r1("view", &[])),
        ]));
        let mut engine = engine_with(backend, &["product", "tech"]);
        engine.step(&NoProgress).await.unwrap();
        engine.step(&NoProgress).await.unwrap();
        let outcome = engine.step(&NoProgress).await.unwrap();
        assert!(matches!(
            outcome,
            StepOutcome::PhaseAdvanced { to: RoundPhase::Synthesis, .. }
        ));
        // The dropped question never reached the transcript
        assert!(!engine
            .transcript()
            .iter()
            .any(|i| matches!(i, TranscriptItem::Question { .. })));
    }

    #[tokio::test]
    async fn test_failed_turn_is_idempotent() {
        let backend = Arc::new(ScriptedBackend::new(vec![Err(GenerationError::Timeout)]));
        let mut engine = engine_with(Arc::clone(&backend), &["product", "tech"]);

        let before_len = engine.transcript().len();
        let err = engine.step(&NoProgress).await.unwrap_err();
        assert!(matches!(err, TurnError::Generation(GenerationError::Timeout)));

        // Nothing committed, cursor unmoved
        assert_eq!(engine.cursor(), 0);
        assert_eq!(engine.transcript().len(), before_len);

        // Retry re-targets the same agent and commits exactly one response
        backend.push(Ok(r1("recovered", &[])));
        engine.step(&NoProgress).await.unwrap();
        assert_eq!(engine.cursor(), 1);
        assert_eq!(count_responses(engine.transcript()), 1);
    }

    #[tokio::test]
    async fn test_malformed_response_is_turn_failure() {
        let backend = Arc::new(ScriptedBackend::new(vec![Ok(GenerationOutput::text_only(
            "no json here",
        ))]));
        let mut engine = engine_with(backend, &["product", "tech"]);
        let err = engine.step(&NoProgress).await.unwrap_err();
        assert!(matches!(err, TurnError::Malformed(_)));
        assert_eq!(engine.cursor(), 0);
    }

    #[tokio::test]
    async fn test_round2_sources_only_on_first_answer() {
        let backend = Arc::new(ScriptedBackend::new(vec![
        Ok(r1("view", &[("Tech Lead", "Q1"), ("Tech Lead", "Q2")])),
            Ok(r1("view", &[])),
        ]));
        let mut engine = engine_with(Arc::clone(&backend), &["product", "tech"]);
        // Round 1, both agents + transition
        engine.step(&NoProgress).await.unwrap();
        engine.step(&NoProgress).await.unwrap();
        engine.step(&NoProgress).await.unwrap();

        // Round 2: product has nothing (no call), tech answers both with sources
        let mut tech_output = r2(&[("Q1", "A1"), ("Q2", "A2")], &[]);
        tech_output.sources = vec![Source {
            uri: "https://example.com".to_string(),
            title: "Example".to_string(),
        }];
        backend.push(Ok(tech_output));

        engine.step(&NoProgress).await.unwrap(); // product: no questions note
        engine.step(&NoProgress).await.unwrap(); // tech answers

        let answers: Vec<_> = engine
            .transcript()
            .iter()
            .filter_map(|i| match i {
                TranscriptItem::Answer { sources, .. } => Some(sources.len()),
                _ => None,
            })
            .collect();
        assert_eq!(answers, vec![1, 0]);
    }

    #[tokio::test]
    async fn test_coffee_box_scenario() {
        // Single meeting, [product, marketing, tech]; Product asks Tech
        // one question, nobody else asks anything.
        let backend = Arc::new(ScriptedBackend::new(vec![
            Ok(r1("product analysis", &[("Tech Lead", "How long for MVP?")])),
            Ok(r1("marketing analysis", &[])),
            Ok(r1("tech analysis", &[])),
        ]));
        let mut engine = engine_with(Arc::clone(&backend), &["product", "marketing", "tech"]);

        // Round 1: three turns + transition into Round 2
        for _ in 0..3 {
            engine.step(&NoProgress).await.unwrap();
        }
        assert_eq!(count_responses(engine.transcript()), 3);
        engine.step(&NoProgress).await.unwrap();
        assert_eq!(engine.phase(), RoundPhase::Round2);

        // Round 2: only tech generates; it raises no follow-ups
        backend.push(Ok(r2(&[("How long for MVP?", "Six weeks")], &[])));
        let product_turn = engine.step(&NoProgress).await.unwrap(); // product note
        assert!(matches!(
            product_turn,
            StepOutcome::TurnTaken { generated: false, .. }
        ));
        engine.step(&NoProgress).await.unwrap(); // marketing note
        let tech_turn = engine.step(&NoProgress).await.unwrap();
        assert!(matches!(
            tech_turn,
            StepOutcome::TurnTaken { generated: true, .. }
        ));
        assert_eq!(count_answers(engine.transcript()), 1);

        // No round-2 questions -> straight to synthesis, no Round 3
        let outcome = engine.step(&NoProgress).await.unwrap();
        assert!(matches!(
            outcome,
            StepOutcome::PhaseAdvanced { to: RoundPhase::Synthesis, .. }
        ));

        backend.push(Ok(summary_output()));
        let result = match engine.step(&NoProgress).await.unwrap() {
            StepOutcome::Complete(result) => *result,
            other => panic!("expected completion, got {other:?}"),
        };
        assert_eq!(result.summary.key_insights, vec!["i"]);
        assert_eq!(result.summary.consensus_points, vec!["c"]);
        assert!(engine.is_complete());

        // Result transcript ends at "Synthesis complete."; the live one
        // carries the closing marker.
        assert!(matches!(
            result.transcript.items().last(),
            Some(TranscriptItem::System { content }) if content == "Synthesis complete."
        ));
        assert!(matches!(
            engine.transcript().items().last(),
            Some(TranscriptItem::System { content }) if content == "Meeting summary complete."
        ));
    }

    #[tokio::test]
    async fn test_round3_runs_when_round2_raises_questions() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Ok(r1("view", &[("Tech Lead", "Q1")])),
            Ok(r1("view", &[])),
        ]));
        let mut engine = engine_with(Arc::clone(&backend), &["product", "tech"]);
        for _ in 0..3 {
            engine.step(&NoProgress).await.unwrap();
        }

        // Round 2: product's turn is a note (no call); tech answers and
        // asks product back
        backend.push(Ok(r2(
            &[("Q1", "A1")],
            &[("Product Manager", "What about pricing?")],
        )));
        engine.step(&NoProgress).await.unwrap();
        engine.step(&NoProgress).await.unwrap();

        let outcome = engine.step(&NoProgress).await.unwrap();
        assert!(matches!(
            outcome,
            StepOutcome::PhaseAdvanced { to: RoundPhase::Round3, .. }
        ));

        // Round 3: product answers (no grounding), tech has nothing new
        backend.push(Ok(GenerationOutput::text_only(
            r#"{"answers": [{"question": "What about pricing?", "answer": "Tiered"}]}"#,
        )));
        engine.step(&NoProgress).await.unwrap();
        engine.step(&NoProgress).await.unwrap();

        // Round 3 always proceeds to synthesis
        let outcome = engine.step(&NoProgress).await.unwrap();
        assert!(matches!(
            outcome,
            StepOutcome::PhaseAdvanced { to: RoundPhase::Synthesis, .. }
        ));

        let final_answers: Vec<_> = engine
            .transcript()
            .iter()
            .filter_map(|i| match i {
                TranscriptItem::Answer { content, .. } if content.starts_with("Final Answer") => {
                    Some(content.clone())
                }
                _ => None,
            })
            .collect();
        assert_eq!(final_answers.len(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_roundtrip_resumes_mid_meeting() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Ok(r1("view", &[("Tech Lead", "Q1")])),
        ]));
        let mut engine = engine_with(Arc::clone(&backend), &["product", "tech"]);
        engine.step(&NoProgress).await.unwrap();

        // Serialize mid-round-1 with the cursor on the second agent
        let snapshot = engine.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: MeetingSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);

        let client = Arc::new(GenerationClient::new(Arc::clone(&backend), vec![]));
        let ids = vec![AgentId::new("product"), AgentId::new("tech")];
        let mut resumed = MeetingEngine::from_snapshot(
            client,
            Arc::new(AgentRegistry::builtin()),
            true,
            context(),
            &ids,
            restored,
        )
        .unwrap();
        assert_eq!(resumed.cursor(), 1);
        assert_eq!(resumed.phase(), RoundPhase::Round1);

        // Stepping forward continues with the second agent as if
        // uninterrupted.
        backend.push(Ok(r1("tech view", &[])));
        let outcome = resumed.step(&NoProgress).await.unwrap();
        match outcome {
            StepOutcome::TurnTaken { agent, .. } => assert_eq!(agent, AgentId::new("tech")),
            other => panic!("expected a turn, got {other:?}"),
        }
        assert_eq!(count_responses(resumed.transcript()), 2);
    }

    #[tokio::test]
    async fn test_step_after_complete_is_error() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Ok(r1("view", &[])),
            Ok(r1("view", &[])),
        ]));
        let mut engine = engine_with(Arc::clone(&backend), &["product", "tech"]);
        backend.push(Ok(summary_output()));
        drive_to_completion(&mut engine).await;

        let err = engine.step(&NoProgress).await.unwrap_err();
        assert!(matches!(err, TurnError::AlreadyComplete));
    }

    #[test]
    fn test_unknown_roster_id_rejected() {
        let backend = Arc::new(ScriptedBackend::new(vec![]));
        let client = Arc::new(GenerationClient::new(backend, vec![]));
        let ids = vec![AgentId::new("ghost")];
        let err = MeetingEngine::new(
            client,
            Arc::new(AgentRegistry::builtin()),
            true,
            context(),
            &ids,
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::UnknownAgent(_)));
    }
}
