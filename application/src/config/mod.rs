//! Application-level configuration.
//!
//! [`BehaviorConfig`] controls how the orchestration use cases behave:
//! the settling delay between turns, whether grounding is enabled for
//! discussion rounds, and the model fallback chain.

use roundtable_domain::Model;

/// Behavior knobs threaded into the series controller and turn engine
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    /// Cooperative settling delay between turns, in milliseconds.
    /// Exists so observers can render intermediate state; not a
    /// correctness requirement.
    pub turn_delay_ms: u64,
    /// Enable web-grounding for Round 1 and Round 2 calls
    pub grounding: bool,
    /// Ordered model fallback chain for all generation calls
    pub models: Vec<Model>,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            turn_delay_ms: 1000,
            grounding: true,
            models: Model::default_models(),
        }
    }
}
