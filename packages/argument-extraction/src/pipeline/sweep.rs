//! Static sweep: every strategy once, no selection or retry.
//!
//! Used to compare strategies head to head on the same article and model.

use serde::Serialize;
use tracing::warn;

use crate::traits::engine::GenerativeEngine;
use crate::types::{argument_map::ArgumentMap, quality::QualityScore, strategy::StrategyName};

use super::orchestrator::Orchestrator;

/// One strategy's result in a sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyOutcome {
    pub strategy: StrategyName,

    /// `None` when the extraction failed
    pub argument_map: Option<ArgumentMap>,

    /// Present only alongside a map
    pub quality: Option<QualityScore>,
}

impl<E: GenerativeEngine> Orchestrator<E> {
    /// Run every registry strategy in registry order.
    pub async fn sweep(&self, text: &str, source_id: &str) -> Vec<StrategyOutcome> {
        let mut outcomes = Vec::with_capacity(self.registry().len());

        for strategy in self.registry().names() {
            let argument_map = match self.extract(text, strategy).await {
                Ok(map) => Some(map),
                Err(e) => {
                    warn!(
                        source_id = %source_id,
                        model = %self.model(),
                        strategy = %strategy,
                        error = %e,
                        "Sweep extraction failed"
                    );
                    None
                }
            };
            let quality = argument_map.as_ref().map(|m| self.score(m));

            outcomes.push(StrategyOutcome {
                strategy,
                argument_map,
                quality,
            });
        }

        outcomes
    }
}
