//! Progress notification port
//!
//! Defines the interface for reporting meeting progress while the turn
//! engine runs. Implementations live in the presentation layer and can
//! display progress in various ways (console, progress bars, etc.)

use roundtable_domain::{Agent, RoundPhase};

/// Callback for progress updates during meeting execution
pub trait MeetingProgress: Send + Sync {
    /// Called when a meeting starts (index is zero-based)
    fn on_meeting_start(&self, index: usize, total: usize, goal: &str, roster: usize);

    /// Called when a round begins processing its first agent
    fn on_phase_start(&self, phase: RoundPhase, roster: usize);

    /// Called before an agent's turn runs
    fn on_turn_start(&self, phase: RoundPhase, agent: &Agent);

    /// Called after an agent's turn committed; `generated` is false for
    /// "had no questions to answer" turns that skipped the backend
    fn on_turn_complete(&self, phase: RoundPhase, agent: &Agent, generated: bool);

    /// Called when the engine leaves a round (advance or skip)
    fn on_phase_complete(&self, phase: RoundPhase);

    /// Called when a meeting's synthesis finished
    fn on_meeting_complete(&self, index: usize, duration: &str);

    /// Called when the cross-meeting final synthesis starts
    fn on_final_synthesis_start(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl MeetingProgress for NoProgress {
    fn on_meeting_start(&self, _index: usize, _total: usize, _goal: &str, _roster: usize) {}
    fn on_phase_start(&self, _phase: RoundPhase, _roster: usize) {}
    fn on_turn_start(&self, _phase: RoundPhase, _agent: &Agent) {}
    fn on_turn_complete(&self, _phase: RoundPhase, _agent: &Agent, _generated: bool) {}
    fn on_phase_complete(&self, _phase: RoundPhase) {}
    fn on_meeting_complete(&self, _index: usize, _duration: &str) {}
}
