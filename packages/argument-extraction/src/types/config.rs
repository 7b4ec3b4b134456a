//! Configuration for the extraction orchestrator.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::strategy::StrategyName;

/// Configuration for the extraction orchestrator.
///
/// `Default` reproduces the reference behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Maximum attempts per article in the retry loop.
    ///
    /// Zero is treated as one; at least one attempt always runs.
    /// Default: 2.
    pub max_retries: u32,

    /// Quality at or above which an attempt is accepted early.
    ///
    /// Default: 0.6.
    pub acceptance_threshold: f64,

    /// Article characters kept before prompt rendering.
    ///
    /// Default: 3500.
    pub max_input_chars: usize,

    /// Article characters shown to the policy oracle.
    ///
    /// Default: 300.
    pub preview_chars: usize,

    /// Output token budget for extraction calls.
    ///
    /// Default: 1500.
    pub extraction_max_tokens: u32,

    /// Deadline for a single extraction call.
    ///
    /// Default: 90 seconds.
    pub extraction_timeout: Duration,

    /// Sampling temperature for the policy oracle.
    ///
    /// Default: 0.1.
    pub policy_temperature: f32,

    /// Output token budget for the policy oracle.
    ///
    /// Default: 50.
    pub policy_max_tokens: u32,

    /// Deadline for a single policy call.
    ///
    /// Default: 30 seconds.
    pub policy_timeout: Duration,

    /// Strategies run unconditionally by the aggregating mode.
    ///
    /// Default: chain_of_thought, few_shot, recursive.
    pub aggregate_strategies: Vec<StrategyName>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            acceptance_threshold: 0.6,
            max_input_chars: 3500,
            preview_chars: 300,
            extraction_max_tokens: 1500,
            extraction_timeout: Duration::from_secs(90),
            policy_temperature: 0.1,
            policy_max_tokens: 50,
            policy_timeout: Duration::from_secs(30),
            aggregate_strategies: vec![
                StrategyName::ChainOfThought,
                StrategyName::FewShot,
                StrategyName::Recursive,
            ],
        }
    }
}

impl OrchestratorConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts the retry loop will actually run.
    pub fn effective_attempts(&self) -> u32 {
        attempt_budget(self.max_retries)
    }

    /// Set max attempts.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the acceptance threshold.
    pub fn with_acceptance_threshold(mut self, threshold: f64) -> Self {
        self.acceptance_threshold = threshold;
        self
    }

    /// Set the extraction deadline.
    pub fn with_extraction_timeout(mut self, timeout: Duration) -> Self {
        self.extraction_timeout = timeout;
        self
    }

    /// Set the policy deadline.
    pub fn with_policy_timeout(mut self, timeout: Duration) -> Self {
        self.policy_timeout = timeout;
        self
    }

    /// Replace the aggregating strategy subset.
    pub fn with_aggregate_strategies(
        mut self,
        strategies: impl IntoIterator<Item = StrategyName>,
    ) -> Self {
        self.aggregate_strategies = strategies.into_iter().collect();
        self
    }
}

/// Attempts run for a retry budget; zero still runs once.
pub fn attempt_budget(max_retries: u32) -> u32 {
    max_retries.max(1)
}
