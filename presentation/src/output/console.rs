//! Console rendering of plans, summaries, and history

use colored::Colorize;
use roundtable_domain::{AgentRegistry, FinalSummary, PlannedMeeting, Project, Summary};

/// Formats domain values for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// The proposed meeting plan, for review before the series starts
    pub fn format_plan(plan: &[PlannedMeeting], registry: &AgentRegistry) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", "Proposed meeting plan".bold().cyan()));
        for (i, meeting) in plan.iter().enumerate() {
            let experts = meeting
                .agent_ids
                .iter()
                .map(|id| {
                    registry
                        .get(id)
                        .map(|a| a.name.clone())
                        .unwrap_or_else(|| id.to_string())
                })
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!(
                "  {} {}\n    {} {}\n",
                format!("Meeting {}:", i + 1).bold(),
                meeting.goal,
                "Experts:".dimmed(),
                experts
            ));
        }
        out
    }

    fn section(title: &str, items: &[String]) -> String {
        let mut out = format!("  {}\n", title.bold());
        if items.is_empty() {
            out.push_str(&format!("    {}\n", "(none)".dimmed()));
        }
        for item in items {
            out.push_str(&format!("    - {item}\n"));
        }
        out
    }

    /// One meeting's structured summary
    pub fn format_summary(summary: &Summary, duration: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{} {}\n",
            "Meeting summary".bold().cyan(),
            format!("({duration})").dimmed()
        ));
        out.push_str(&Self::section("Key insights", &summary.key_insights));
        out.push_str(&Self::section("Action items", &summary.action_items));
        out.push_str(&Self::section("Potential risks", &summary.potential_risks));
        out.push_str(&Self::section("Consensus points", &summary.consensus_points));
        out
    }

    /// The final executive report
    pub fn format_final_report(report: &FinalSummary) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", "Final project report".bold().cyan()));
        out.push_str(&format!("  {}\n    {}\n", "Executive summary".bold(), report.executive_summary));
        out.push_str(&Self::section(
            "Key decisions & pivots",
            &report.key_decisions_and_pivots,
        ));
        out.push_str(&Self::section("Final action plan", &report.final_action_plan));
        out.push_str(&Self::section("Outstanding risks", &report.outstanding_risks));
        out.push_str(&format!("  {}\n    {}\n", "Conclusion".bold(), report.project_conclusion));
        out
    }

    /// History listing, most recent first
    pub fn format_history(projects: &[Project]) -> String {
        if projects.is_empty() {
            return format!("{}\n", "No stored projects.".dimmed());
        }
        let mut out = String::new();
        for project in projects {
            let status = if project.is_completed() {
                "Completed".green()
            } else {
                "In Progress".yellow()
            };
            out.push_str(&format!(
                "{}  {}  [{}]  {}/{} meetings\n",
                project.id.bold(),
                project.updated_at.format("%Y-%m-%d %H:%M"),
                status,
                project.meeting_results.len(),
                project.meeting_plan.len(),
            ));
            out.push_str(&format!("    {}\n", project.topic));
        }
        out
    }

    /// Full detail view of one stored project
    pub fn format_project(project: &Project, registry: &AgentRegistry) -> String {
        let mut out = String::new();
        out.push_str(&format!("{} {}\n", "Topic:".bold(), project.topic));
        out.push_str(&format!(
            "{} {}\n\n",
            "Status:".bold(),
            if project.is_completed() {
                "Completed".green()
            } else {
                "In Progress".yellow()
            }
        ));

        for (i, result) in project.meeting_results.iter().enumerate() {
            let participants = result
                .agent_ids
                .iter()
                .map(|id| {
                    registry
                        .get(id)
                        .map(|a| a.name.clone())
                        .unwrap_or_else(|| id.to_string())
                })
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!(
                "{} {}\n  {} {}\n",
                format!("Meeting {}:", i + 1).bold().cyan(),
                result.goal,
                "Participants:".dimmed(),
                participants
            ));
            out.push_str(&Self::format_summary(&result.summary, &result.duration));
            if let Some(feedback) = &result.user_feedback {
                out.push_str(&format!("  {} {}\n", "User feedback:".bold(), feedback));
            }
            out.push('\n');
        }

        if let Some(report) = &project.final_summary {
            out.push_str(&Self::format_final_report(report));
        }
        out
    }
}
