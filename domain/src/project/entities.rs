//! The persistence-facing project aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::topic::Topic;
use crate::meeting::plan::PlannedMeeting;
use crate::meeting::result::MeetingResult;
use crate::meeting::summary::FinalSummary;
use crate::project::phase::ProjectStatus;
use crate::project::snapshot::MeetingSnapshot;

/// A stored project fails a consistency check required for resuming
#[derive(Error, Debug)]
pub enum StateInconsistency {
    #[error("project is in progress but has no meeting plan")]
    MissingPlan,

    #[error("snapshot points at meeting {index} but the plan has {planned} meetings")]
    SnapshotOutOfRange { index: usize, planned: usize },

    #[error("snapshot cursor {cursor} exceeds the meeting's roster of {roster}")]
    CursorOutOfRange { cursor: usize, roster: usize },

    #[error("snapshot belongs to meeting {snapshot} but {completed} meetings are already complete")]
    SnapshotBehindResults { snapshot: usize, completed: usize },

    #[error("more meeting results ({completed}) than planned meetings ({planned})")]
    TooManyResults { completed: usize, planned: usize },
}

/// Where a stored project should pick up when resumed
#[derive(Debug, Clone, PartialEq)]
pub enum ResumePoint {
    /// Continue mid-meeting from the stored snapshot
    MidMeeting(usize),
    /// Start the meeting at this index fresh
    NextMeeting(usize),
    /// All meetings done, final report still missing
    FinalSynthesis,
    /// Nothing left to do
    Done,
}

/// The durable aggregate persisted after every state transition
///
/// The series controller is the sole mutator; the store only persists
/// and returns instances. Transcripts inside reference agents by id and
/// are re-resolved against the live registry on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub topic: Topic,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: ProjectStatus,
    pub meeting_plan: Vec<PlannedMeeting>,
    #[serde(default)]
    pub meeting_results: Vec<MeetingResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_summary: Option<FinalSummary>,
    /// In-flight meeting state; absent between meetings and after completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<MeetingSnapshot>,
}

impl Project {
    pub fn new(
        id: impl Into<String>,
        topic: Topic,
        meeting_plan: Vec<PlannedMeeting>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            topic,
            created_at: now,
            updated_at: now,
            status: ProjectStatus::InProgress,
            meeting_plan,
            meeting_results: Vec::new(),
            final_summary: None,
            snapshot: None,
        }
    }

    /// Bump the modification timestamp; called by the controller on every save
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub fn is_completed(&self) -> bool {
        self.status == ProjectStatus::Completed
    }

    /// Determine the resume point, validating stored-state consistency.
    ///
    /// Resume must never fabricate missing state: any hole in the stored
    /// record surfaces as a [`StateInconsistency`].
    pub fn resume_point(&self) -> Result<ResumePoint, StateInconsistency> {
        if self.is_completed() && self.final_summary.is_some() {
            return Ok(ResumePoint::Done);
        }

        if self.meeting_plan.is_empty() {
            return Err(StateInconsistency::MissingPlan);
        }

        let planned = self.meeting_plan.len();
        let completed = self.meeting_results.len();
        if completed > planned {
            return Err(StateInconsistency::TooManyResults { completed, planned });
        }

        if let Some(snapshot) = &self.snapshot {
            if snapshot.meeting_index >= planned {
                return Err(StateInconsistency::SnapshotOutOfRange {
                    index: snapshot.meeting_index,
                    planned,
                });
            }
            if snapshot.meeting_index < completed {
                return Err(StateInconsistency::SnapshotBehindResults {
                    snapshot: snapshot.meeting_index,
                    completed,
                });
            }
            let roster = self.meeting_plan[snapshot.meeting_index].agent_ids.len();
            if snapshot.agent_cursor > roster {
                return Err(StateInconsistency::CursorOutOfRange {
                    cursor: snapshot.agent_cursor,
                    roster,
                });
            }
            return Ok(ResumePoint::MidMeeting(snapshot.meeting_index));
        }

        if completed < planned {
            Ok(ResumePoint::NextMeeting(completed))
        } else {
            Ok(ResumePoint::FinalSynthesis)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentId;
    use crate::meeting::rounds::MeetingData;
    use crate::meeting::summary::Summary;
    use crate::meeting::transcript::Transcript;
    use crate::project::phase::RoundPhase;

    fn now() -> DateTime<Utc> {
        "2026-03-01T10:00:00Z".parse().unwrap()
    }

    fn plan() -> Vec<PlannedMeeting> {
        vec![
            PlannedMeeting::new("Strategy", vec![AgentId::new("product"), AgentId::new("vc")]),
            PlannedMeeting::new("Feasibility", vec![AgentId::new("tech")]),
        ]
    }

    fn completed_result(goal: &str) -> MeetingResult {
        MeetingResult::new(
            goal,
            vec![AgentId::new("product")],
            Transcript::new(),
            Summary::default(),
            "10s",
        )
    }

    fn snapshot(meeting_index: usize, cursor: usize) -> MeetingSnapshot {
        MeetingSnapshot {
            phase: RoundPhase::Round1,
            meeting_index,
            agent_cursor: cursor,
            meeting_data: MeetingData::default(),
            transcript: Transcript::new(),
            started_at: now(),
        }
    }

    #[test]
    fn test_fresh_project_resumes_at_first_meeting() {
        let project = Project::new("p1", Topic::new("coffee").unwrap(), plan(), now());
        assert_eq!(project.resume_point().unwrap(), ResumePoint::NextMeeting(0));
    }

    #[test]
    fn test_mid_meeting_snapshot_wins() {
        let mut project = Project::new("p1", Topic::new("coffee").unwrap(), plan(), now());
        project.snapshot = Some(snapshot(0, 1));
        assert_eq!(project.resume_point().unwrap(), ResumePoint::MidMeeting(0));
    }

    #[test]
    fn test_all_meetings_done_resumes_at_final_synthesis() {
        let mut project = Project::new("p1", Topic::new("coffee").unwrap(), plan(), now());
        project.meeting_results = vec![completed_result("Strategy"), completed_result("Feasibility")];
        assert_eq!(project.resume_point().unwrap(), ResumePoint::FinalSynthesis);
    }

    #[test]
    fn test_missing_plan_is_inconsistent() {
        let project = Project::new("p1", Topic::new("coffee").unwrap(), vec![], now());
        assert!(matches!(
            project.resume_point(),
            Err(StateInconsistency::MissingPlan)
        ));
    }

    #[test]
    fn test_snapshot_out_of_range_is_inconsistent() {
        let mut project = Project::new("p1", Topic::new("coffee").unwrap(), plan(), now());
        project.snapshot = Some(snapshot(5, 0));
        assert!(matches!(
            project.resume_point(),
            Err(StateInconsistency::SnapshotOutOfRange { .. })
        ));
    }

    #[test]
    fn test_cursor_past_roster_is_inconsistent() {
        let mut project = Project::new("p1", Topic::new("coffee").unwrap(), plan(), now());
        project.snapshot = Some(snapshot(0, 7));
        assert!(matches!(
            project.resume_point(),
            Err(StateInconsistency::CursorOutOfRange { .. })
        ));
    }

    #[test]
    fn test_completed_project_is_done() {
        let mut project = Project::new("p1", Topic::new("coffee").unwrap(), plan(), now());
        project.status = ProjectStatus::Completed;
        project.final_summary = Some(FinalSummary::default());
        assert_eq!(project.resume_point().unwrap(), ResumePoint::Done);
    }

    #[test]
    fn test_project_roundtrip() {
        let mut project = Project::new("p1", Topic::new("coffee").unwrap(), plan(), now());
        project.snapshot = Some(snapshot(0, 1));
        let json = serde_json::to_string(&project).unwrap();
        let back: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(back, project);
    }
}
