//! The Orchestrator - main entry point for argument extraction.
//!
//! Drives classification, strategy selection, extraction and validation
//! through a bounded retry loop:
//!
//! ```text
//! classify ─▶ SELECT ─▶ EXTRACT ─▶ VALIDATE ─┬─▶ ACCEPT (quality ≥ threshold or last attempt)
//!               ▲                            │
//!               └──────────── RETRY ◀────────┘
//! ```
//!
//! Every engine failure is absorbed: the selector falls back to a fixed
//! table and a failed extraction either moves on to the next attempt or,
//! on the last attempt, becomes an all-empty map.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::traits::engine::GenerativeEngine;
use crate::types::{
    argument_map::ArgumentMap,
    config::{attempt_budget, OrchestratorConfig},
    decision::{DecisionLog, DecisionLogEntry},
    difficulty::DifficultyCategory,
    quality::QualityScore,
    strategy::StrategyName,
};

use super::{classify, extract, registry::StrategyRegistry, select, validate};

/// Result of one article's trip through the retry loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessOutcome {
    /// The returned map: the accepted attempt, or the last one
    pub argument_map: ArgumentMap,

    /// Difficulty computed once for the article
    pub category: DifficultyCategory,

    /// Strategy of the returned attempt
    pub strategy: StrategyName,

    /// Quality of the returned map
    pub quality: QualityScore,

    /// Extraction attempts issued (including failed, unlogged ones)
    pub attempts: u32,

    /// One entry per scored attempt, in attempt order
    pub decisions: DecisionLog,
}

impl ProcessOutcome {
    /// Whether the returned map met the acceptance threshold.
    pub fn accepted(&self, threshold: f64) -> bool {
        self.quality.meets(threshold)
    }
}

/// Adaptive extraction over one generative engine and model.
///
/// Holds no mutable state; each call builds and returns its own decision
/// log, so one orchestrator can serve concurrent articles.
///
/// # Example
///
/// ```rust,ignore
/// let orchestrator = Orchestrator::new(engine, "llama3.1");
///
/// let outcome = orchestrator.process(&article_text, "article-17").await;
/// corpus_log.extend(outcome.decisions);
///
/// let merged = orchestrator.process_multi(&article_text, "article-17").await;
/// ```
pub struct Orchestrator<E: GenerativeEngine> {
    engine: E,
    model: String,
    registry: StrategyRegistry,
    config: OrchestratorConfig,
}

impl<E: GenerativeEngine> Orchestrator<E> {
    /// Create an orchestrator with the reference configuration.
    pub fn new(engine: E, model: impl Into<String>) -> Self {
        Self::with_config(engine, model, OrchestratorConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(engine: E, model: impl Into<String>, config: OrchestratorConfig) -> Self {
        Self {
            engine,
            model: model.into(),
            registry: StrategyRegistry::standard(),
            config,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Classify an article's difficulty.
    pub fn classify(&self, text: &str) -> DifficultyCategory {
        classify::classify(text)
    }

    /// Choose a strategy; always returns a registry member.
    pub async fn select(&self, text: &str, category: DifficultyCategory) -> StrategyName {
        select::select(
            &self.engine,
            &self.registry,
            &self.config,
            &self.model,
            text,
            category,
        )
        .await
    }

    /// Run a single extraction with a fixed strategy.
    pub async fn extract(&self, text: &str, strategy: StrategyName) -> Result<ArgumentMap> {
        extract::extract(
            &self.engine,
            &self.registry,
            &self.config,
            &self.model,
            text,
            strategy,
        )
        .await
    }

    /// Score a map for completeness.
    pub fn score(&self, map: &ArgumentMap) -> QualityScore {
        validate::score(map)
    }

    // =========================================================================
    // Retry/accept loop
    // =========================================================================

    /// Process one article with the configured attempt budget.
    pub async fn process(&self, text: &str, source_id: &str) -> ProcessOutcome {
        self.process_with_retries(text, source_id, self.config.max_retries)
            .await
    }

    /// Process one article with at most `max_retries` attempts (minimum one).
    ///
    /// Returns as soon as an attempt reaches the acceptance threshold. When
    /// none does, the last attempt is returned even if an earlier one scored
    /// higher. The decision log holds one entry per scored attempt: failed
    /// extractions before the last attempt are retried without an entry.
    pub async fn process_with_retries(
        &self,
        text: &str,
        source_id: &str,
        max_retries: u32,
    ) -> ProcessOutcome {
        let attempts = attempt_budget(max_retries);
        let threshold = self.config.acceptance_threshold;
        let category = self.classify(text);
        let mut decisions = DecisionLog::new();

        debug!(
            source_id = %source_id,
            model = %self.model,
            category = %category,
            max_attempts = attempts,
            "Processing article"
        );

        let mut attempt = 0;
        loop {
            attempt += 1;
            let is_last = attempt >= attempts;

            let strategy = self.select(text, category).await;

            let argument_map = match self.extract(text, strategy).await {
                Ok(map) => map,
                Err(e) if !is_last => {
                    warn!(
                        source_id = %source_id,
                        model = %self.model,
                        strategy = %strategy,
                        attempt,
                        error = %e,
                        "Extraction failed, retrying"
                    );
                    continue;
                }
                Err(e) => {
                    warn!(
                        source_id = %source_id,
                        model = %self.model,
                        strategy = %strategy,
                        attempt,
                        error = %e,
                        "Extraction failed on final attempt, returning empty map"
                    );
                    ArgumentMap::empty()
                }
            };

            let quality = self.score(&argument_map);
            decisions.push(DecisionLogEntry {
                source_id: source_id.to_string(),
                model: self.model.clone(),
                article_type: category,
                attempt,
                strategy_chosen: strategy,
                quality_score: quality,
            });

            if quality.meets(threshold) || is_last {
                info!(
                    source_id = %source_id,
                    model = %self.model,
                    strategy = %strategy,
                    attempt,
                    quality = quality.value(),
                    accepted = quality.meets(threshold),
                    "Article processed"
                );

                return ProcessOutcome {
                    argument_map,
                    category,
                    strategy,
                    quality,
                    attempts: attempt,
                    decisions,
                };
            }

            debug!(
                source_id = %source_id,
                strategy = %strategy,
                attempt,
                quality = quality.value(),
                "Quality below threshold, retrying"
            );
        }
    }
}
