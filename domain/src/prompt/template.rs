//! Prompt templates for the meeting flow
//!
//! Pure string assembly: the inputs are domain values, the output is the
//! exact prompt handed to the generation client. The JSON shape examples
//! embedded here are the contract the response parser expects back.

use crate::agent::Agent;
use crate::meeting::result::MeetingResult;
use crate::meeting::summary::Summary;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Planner prompt: decompose a topic into a meeting series
    pub fn plan(topic: &str, catalogue: &[Agent]) -> String {
        let experts = catalogue
            .iter()
            .map(|a| format!("- {} (id: {}) - Core function: {}", a.name, a.id, a.short_persona))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"You are an expert project manager and strategist. Your task is to devise a logical and efficient series of meetings to analyze a project from inception to a go-to-market plan.

Topic: "{topic}"

Available Experts (use their 'id' for selection):
{experts}

Your goal is to create a project plan as a series of meetings. Follow these rules strictly:
1. **Project Lifecycle Flow:** The meetings must follow a logical project lifecycle. Start with strategy and validation, then move to feasibility and design, and finally cover execution and go-to-market.
2. **Strict 3-Expert Limit Per Meeting:** Each meeting MUST have a maximum of 3 experts. This is a critical constraint for focus.
3. **Optimal Expert Selection:** For each meeting's goal, select only the most critical experts.
4. **Actionable Goals:** Each meeting must have a concise, actionable 'goal'.
5. **Number of Meetings:** Plan for 1 to 4 meetings in total.

CRITICAL FORMATTING RULE: Your entire response must be ONLY a single, raw, valid JSON array. Do not add any text, markdown, or formatting before or after the JSON.

Example format:
[
  {{
    "goal": "Define the product vision, validate the market opportunity, and assess the business case.",
    "agentIds": ["product", "vc", "marketing"]
  }},
  {{
    "goal": "Determine technical feasibility, design the core user experience, and identify legal risks.",
    "agentIds": ["tech", "design", "legal"]
  }}
]"#
        )
    }

    /// Round 1 prompt: main analysis plus up to two cross-questions
    pub fn round1(
        agent: &Agent,
        topic: &str,
        goal: &str,
        others: &[&Agent],
        previous_summary: Option<&Summary>,
        steering: Option<&str>,
    ) -> String {
        let context = match previous_summary {
            Some(summary) => {
                let mut block = format!(
                    r#"This is a follow-up meeting.
The goal of this specific meeting is: "{goal}".
Context from the previous meeting's summary:
- Key Insights: {}
- Action Items: {}
- Potential Risks: {}
- Consensus Points: {}"#,
                    summary.key_insights.join("; "),
                    summary.action_items.join("; "),
                    summary.potential_risks.join("; "),
                    summary.consensus_points.join("; "),
                );
                if let Some(direction) = steering.filter(|s| !s.trim().is_empty()) {
                    block.push_str(&format!("\nUser Direction: {direction}"));
                }
                block
            }
            None => format!(
                r#"This is the first meeting on this topic. The goal of this meeting is: "{goal}""#
            ),
        };

        let other_names = Self::name_list(others);

        format!(
            r#"Overall Topic: "{topic}"

{context}

Your Role: {persona}

You are in Round 1 of a roundtable discussion with other experts for THIS meeting: {other_names}.

Use your access to web search to find the latest information, data, and trends to inform your answer.

Your tasks:
1. **Main Answer:** Provide your primary expert analysis on the topic, keeping this meeting's specific goal in mind. Be concise, using bullet points if helpful (max 100 words).
2. **Cross-Questions:** Raise a maximum of 2 brief, insightful questions for up to 2 other specific experts from the list for this meeting. Your questions should challenge their perspective or ask for clarification based on this meeting's goal.

Format your entire response as a single JSON object, and nothing else. Do not include markdown formatting. The JSON object must look like this:
{{
  "mainAnswer": "Your concise analysis here.",
  "crossQuestions": [
    {{ "ask_expert": "Expert Name", "question": "Your question for them." }},
    {{ "ask_expert": "Another Expert Name", "question": "Your second question." }}
  ]
}}"#,
            persona = agent.persona,
        )
    }

    /// Round 2 prompt: answer round-1 questions, optionally raise follow-ups
    pub fn round2(agent: &Agent, topic: &str, questions: &[String], others: &[&Agent]) -> String {
        let other_names = Self::name_list(others);
        let question_list = Self::numbered(questions);

        format!(
            r#"Topic: "{topic}"

Your Role: {persona}

You are in Round 2 of a roundtable discussion with other experts: {other_names}. In Round 1, other experts asked you the following questions:
{question_list}

Use your access to web search to find the latest information, data, and trends to inform your answers.

Your tasks:
1. **Answer Questions:** Provide concise, direct answers to each of these questions.
2. **Raise Follow-up Questions:** Based on the discussion so far and the questions you just answered, raise a maximum of 2 new, brief follow-up questions for up to 2 other experts to deepen the conversation.

Format your entire response as a single JSON object, and nothing else. Do not include markdown formatting. The JSON object must look like this:
{{
  "answers": [
    {{ "question": "The first question you were asked.", "answer": "Your answer to it." }}
  ],
  "crossQuestions": [
    {{ "ask_expert": "Expert Name", "question": "Your new follow-up question." }}
  ]
}}"#,
            persona = agent.persona,
        )
    }

    /// Round 3 prompt: final answers only, no new questions
    pub fn round3(agent: &Agent, topic: &str, questions: &[String]) -> String {
        let question_list = Self::numbered(questions);

        format!(
            r#"Topic: "{topic}"

Your Role: {persona}

You are in the FINAL round (Round 3) of a roundtable discussion. This is the last chance for clarification. In Round 2, other experts asked you the following follow-up questions:
{question_list}

Your task is to provide concise, final answers to each of these questions. Do NOT ask any new questions.

Format your entire response as a single JSON object, and nothing else. Do not include markdown formatting. The JSON object must look like this:
{{
  "answers": [
    {{ "question": "The first question you were asked.", "answer": "Your final answer to it." }},
    {{ "question": "The second question you were asked.", "answer": "Your final answer." }}
  ]
}}"#,
            persona = agent.persona,
        )
    }

    /// Meeting synthesis prompt over the condensed transcript
    pub fn meeting_synthesis(
        topic: &str,
        goal: &str,
        participants: &[&Agent],
        condensed_transcript: &str,
    ) -> String {
        let names = Self::name_list(participants);

        format!(
            r#"You are an expert meeting facilitator. Analyze the following roundtable meeting transcript.
Topic: "{topic}"
Meeting Goal: "{goal}"
The participants were: {names}

Transcript:
---
{condensed_transcript}
---

Based on the entire discussion, generate a comprehensive summary. Your summary should be structured as a JSON object with the following keys: "keyInsights", "actionItems", "potentialRisks", and "consensusPoints". Each key should have an array of strings as its value.

Format your entire response as a single JSON object, and nothing else. Do not include markdown formatting."#
        )
    }

    /// Final report prompt over all meeting summaries in chronological order
    pub fn final_report(topic: &str, results: &[MeetingResult]) -> String {
        let summaries = results
            .iter()
            .enumerate()
            .map(|(i, result)| {
                let mut block = format!(
                    r#"---
Meeting {} (Goal: {})
- Key Insights: {}
- Action Items: {}
- Potential Risks: {}
- Consensus Points: {}"#,
                    i + 1,
                    result.goal,
                    result.summary.key_insights.join("; "),
                    result.summary.action_items.join("; "),
                    result.summary.potential_risks.join("; "),
                    result.summary.consensus_points.join("; "),
                );
                if let Some(feedback) = result.user_feedback.as_deref().filter(|f| !f.trim().is_empty()) {
                    block.push_str(&format!("\n- User Feedback: {feedback}"));
                }
                block.push_str("\n---");
                block
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"You are a Chief of Staff responsible for creating a final executive report for a project. You have been given the summaries from a series of meetings.

Project Topic: "{topic}"

Here are the meeting summaries in chronological order:
{summaries}

Your task is to synthesize all of the above information into a single, structured Final Project Report. Do not just repeat the inputs; analyze and consolidate them into a coherent final assessment.

Your response must be a JSON object with the following structure:
{{
  "executiveSummary": "A concise, high-level paragraph (3-4 sentences) summarizing the project's journey from concept to conclusion, and the final recommendation.",
  "keyDecisionsAndPivots": [
    "A bulleted list of the most critical decisions made or strategic pivots that occurred during the meetings."
  ],
  "finalActionPlan": [
    "A consolidated, prioritized list of the most important, actionable next steps for the project to move forward."
  ],
  "outstandingRisks": [
    "A bulleted list of the most significant risks that remain unresolved or require ongoing monitoring."
  ],
  "projectConclusion": "A clear, one-sentence final recommendation for the project."
}}"#
        )
    }

    fn name_list(agents: &[&Agent]) -> String {
        agents
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn numbered(items: &[String]) -> String {
        items
            .iter()
            .enumerate()
            .map(|(i, q)| format!("{}. \"{}\"", i + 1, q))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
