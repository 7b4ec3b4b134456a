//! JSON report written to stdout.

use serde::Serialize;

use argument_extraction::{
    ArgumentMap, DecisionLog, DecisionSummary, ProcessOutcome, StrategyOutcome,
};

/// Everything one invocation produced.
#[derive(Debug, Serialize)]
pub struct Report {
    pub source_id: String,
    pub mode: String,
    pub runs: Vec<ModelRun>,

    /// Per-model decision logs merged in model order
    pub decision_log: DecisionLog,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<DecisionSummary>,
}

/// Results of every requested mode for one model.
#[derive(Debug, Serialize)]
pub struct ModelRun {
    pub model: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub adaptive: Option<ProcessOutcome>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<ArgumentMap>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweep: Option<Vec<StrategyOutcome>>,
}

impl ModelRun {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            adaptive: None,
            aggregate: None,
            sweep: None,
        }
    }
}
