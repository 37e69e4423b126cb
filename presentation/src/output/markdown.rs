//! Markdown rendering of transcripts and reports
//!
//! Agents are stored by id; names are resolved against the live
//! registry here, at the rendering boundary. Unknown ids (registry
//! drift between runs) fall back to the raw id.

use roundtable_domain::{
    AgentId, AgentRegistry, FinalSummary, MeetingResult, Project, Source, Summary, Transcript,
    TranscriptItem,
};

fn agent_name(registry: &AgentRegistry, id: &AgentId) -> String {
    registry
        .get(id)
        .map(|a| a.name.clone())
        .unwrap_or_else(|| id.to_string())
}

fn sources_block(sources: &[Source]) -> String {
    if sources.is_empty() {
        return String::new();
    }
    let list = sources
        .iter()
        .map(|s| format!("    - [{}]({})", s.title, s.uri))
        .collect::<Vec<_>>()
        .join("\n");
    format!("\n\n    **Sources:**\n{list}")
}

/// Render a transcript as a markdown document
pub fn transcript_to_markdown(transcript: &Transcript, registry: &AgentRegistry) -> String {
    transcript
        .iter()
        .map(|item| match item {
            TranscriptItem::System { content } => format!("\n*--- {content} ---*\n"),
            TranscriptItem::Response {
                agent,
                content,
                sources,
            } => format!(
                "**{}:** {}{}",
                agent_name(registry, agent),
                content,
                sources_block(sources)
            ),
            TranscriptItem::Question { from, to, content } => format!(
                "> **{} asks {}:** {}",
                agent_name(registry, from),
                agent_name(registry, to),
                content
            ),
            TranscriptItem::Answer {
                agent,
                content,
                sources,
            } => format!(
                "**{} answers:** {}{}",
                agent_name(registry, agent),
                content,
                sources_block(sources)
            ),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn bullet_section(title: &str, items: &[String]) -> String {
    let body = if items.is_empty() {
        "- (none)".to_string()
    } else {
        items
            .iter()
            .map(|i| format!("- {i}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!("## {title}\n\n{body}")
}

/// Render one meeting summary as markdown sections
pub fn summary_to_markdown(summary: &Summary) -> String {
    [
        bullet_section("Key Insights", &summary.key_insights),
        bullet_section("Action Items", &summary.action_items),
        bullet_section("Potential Risks", &summary.potential_risks),
        bullet_section("Consensus Points", &summary.consensus_points),
    ]
    .join("\n\n")
}

/// Render the final executive report as markdown
pub fn final_report_to_markdown(report: &FinalSummary) -> String {
    [
        format!("## Executive Summary\n\n{}", report.executive_summary),
        bullet_section("Key Decisions & Pivots", &report.key_decisions_and_pivots),
        bullet_section("Final Action Plan", &report.final_action_plan),
        bullet_section("Outstanding Risks", &report.outstanding_risks),
        format!("## Conclusion\n\n{}", report.project_conclusion),
    ]
    .join("\n\n")
}

fn meeting_section(
    index: usize,
    result: &MeetingResult,
    registry: &AgentRegistry,
    include_transcript: bool,
) -> String {
    let participants = result
        .agent_ids
        .iter()
        .map(|id| agent_name(registry, id))
        .collect::<Vec<_>>()
        .join(", ");
    let mut section = format!(
        "# Meeting {}: {}\n\nParticipants: {}  \nDuration: {}\n\n{}",
        index + 1,
        result.goal,
        participants,
        result.duration,
        summary_to_markdown(&result.summary)
    );
    if let Some(feedback) = &result.user_feedback {
        section.push_str(&format!("\n\n## User Feedback\n\n{feedback}"));
    }
    if include_transcript {
        section.push_str(&format!(
            "\n\n## Transcript\n\n{}",
            transcript_to_markdown(&result.transcript, registry)
        ));
    }
    section
}

/// Full project report document: per-meeting summaries plus the final report
pub fn project_report_to_markdown(project: &Project, registry: &AgentRegistry) -> String {
    let mut sections = vec![format!("# Project: {}\n", project.topic)];
    for (i, result) in project.meeting_results.iter().enumerate() {
        sections.push(meeting_section(i, result, registry, false));
    }
    if let Some(report) = &project.final_summary {
        sections.push(format!(
            "# Final Project Report\n\n{}",
            final_report_to_markdown(report)
        ));
    }
    sections.join("\n\n")
}

/// Transcript document covering one meeting or the whole series
pub fn project_transcript_to_markdown(
    project: &Project,
    registry: &AgentRegistry,
    meeting: Option<usize>,
) -> Option<String> {
    match meeting {
        Some(index) => {
            let result = project.meeting_results.get(index)?;
            Some(meeting_section(index, result, registry, true))
        }
        None => {
            let sections: Vec<String> = project
                .meeting_results
                .iter()
                .enumerate()
                .map(|(i, r)| meeting_section(i, r, registry, true))
                .collect();
            if sections.is_empty() {
                // Nothing completed yet; fall back to the in-flight transcript
                project
                    .snapshot
                    .as_ref()
                    .map(|s| transcript_to_markdown(&s.transcript, registry))
            } else {
                Some(sections.join("\n\n"))
            }
        }
    }
}
