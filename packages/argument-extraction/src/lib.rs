//! Adaptive Argument-Map Extraction Library
//!
//! Turns free-form article text into a structured argument map (thesis,
//! supporting claims, counterarguments, evidence) by prompting a generative
//! text engine. A policy oracle picks one of several prompting strategies
//! per attempt, replies are repaired into a canonical shape, and a bounded
//! retry loop accepts the first result that scores well enough.
//!
//! # Usage
//!
//! ```rust,ignore
//! use argument_extraction::{Orchestrator, DecisionLog, OpenAICompatEngine};
//!
//! let engine = OpenAICompatEngine::from_env()?;
//! let orchestrator = Orchestrator::new(engine, "llama3.1");
//!
//! // Adaptive: select, extract, validate, retry
//! let outcome = orchestrator.process(&text, "article-1").await;
//! let mut log = DecisionLog::new();
//! log.extend(outcome.decisions);
//!
//! // Aggregating: fixed strategies, merged with set semantics
//! let merged = orchestrator.process_multi(&text, "article-1").await;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - The generative engine seam
//! - [`types`] - Argument maps, strategies, scores, config and decision logs
//! - [`pipeline`] - Classification, selection, extraction, validation and orchestration
//! - [`ai`] - OpenAI-compatible engine (feature `openai`)
//! - [`testing`] - Scripted engine for tests

pub mod error;
pub mod pipeline;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "openai")]
pub mod ai;

// Re-export core types at crate root
pub use error::{ExtractionError, Result};
pub use traits::engine::{CompletionRequest, GenerativeEngine};
pub use types::{
    argument_map::{ArgumentField, ArgumentMap},
    config::OrchestratorConfig,
    decision::{DecisionLog, DecisionLogEntry, DecisionSummary, StrategySummary},
    difficulty::DifficultyCategory,
    quality::QualityScore,
    strategy::StrategyName,
};

// Re-export Orchestrator from pipeline
pub use pipeline::{Orchestrator, ProcessOutcome, StrategyOutcome};

// Re-export pipeline components
pub use pipeline::{
    // Classification
    classify, TextSignals,
    // Selection
    fallback_for_label, fallback_strategy, parse_policy_reply,
    // Extraction and repair
    find_json_object, normalize_argument_map, parse_argument_map,
    // Validation and aggregation
    merge_dedup, score,
    // Registry
    StrategyRegistry, StrategySpec,
};

#[cfg(feature = "openai")]
pub use ai::OpenAICompatEngine;

// Re-export testing utilities
pub use testing::{MockEngine, MockReply};
