//! Extraction pipeline - the core of the library.
//!
//! The pipeline orchestrates:
//! - Strategy registry (templates + temperatures)
//! - Difficulty classification
//! - Strategy selection (policy oracle with fallback table)
//! - Extraction with reply repair and normalization
//! - Quality validation
//! - Retry/accept loop, aggregation and static sweeps

pub mod aggregate;
pub mod classify;
pub mod extract;
pub mod orchestrator;
pub mod prompts;
pub mod registry;
pub mod select;
pub mod sweep;
pub mod validate;

pub use aggregate::merge_dedup;
pub use classify::{classify, TextSignals};
pub use extract::{
    complete_within_deadline, extraction_request, find_json_object, normalize_argument_map,
    parse_argument_map, MAX_BRACE_DEPTH,
};
pub use orchestrator::{Orchestrator, ProcessOutcome};
pub use prompts::{render_template, truncate_chars};
pub use registry::{StrategyRegistry, StrategySpec};
pub use select::{fallback_for_label, fallback_strategy, parse_policy_reply, policy_request};
pub use sweep::StrategyOutcome;
pub use validate::{score, score_option};
