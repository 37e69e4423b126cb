//! Structured meeting and series summaries

use serde::{Deserialize, Serialize};

/// Structured summary of one completed meeting
///
/// Produced by the synthesis step, immutable once created. All fields
/// default to empty lists so a thin synthesis response still yields a
/// well-formed summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(default)]
    pub key_insights: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub potential_risks: Vec<String>,
    #[serde(default)]
    pub consensus_points: Vec<String>,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.key_insights.is_empty()
            && self.action_items.is_empty()
            && self.potential_risks.is_empty()
            && self.consensus_points.is_empty()
    }
}

/// Executive report synthesized across all meetings of a series
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalSummary {
    #[serde(default)]
    pub executive_summary: String,
    #[serde(default)]
    pub key_decisions_and_pivots: Vec<String>,
    #[serde(default)]
    pub final_action_plan: Vec<String>,
    #[serde(default)]
    pub outstanding_risks: Vec<String>,
    #[serde(default)]
    pub project_conclusion: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_wire_keys_are_camel_case() {
        let summary = Summary {
            key_insights: vec!["insight".to_string()],
            ..Summary::default()
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("keyInsights").is_some());
        assert!(json.get("actionItems").is_some());
    }

    #[test]
    fn test_final_summary_defaults() {
        let parsed: FinalSummary =
            serde_json::from_str(r#"{"projectConclusion": "Proceed with MVP."}"#).unwrap();
        assert_eq!(parsed.project_conclusion, "Proceed with MVP.");
        assert!(parsed.final_action_plan.is_empty());
        assert!(parsed.executive_summary.is_empty());
    }
}
