//! Strategy selection: ask a policy oracle, fall back to a fixed table.

use tracing::{debug, warn};

use crate::traits::engine::{CompletionRequest, GenerativeEngine};
use crate::types::{
    config::OrchestratorConfig, difficulty::DifficultyCategory, strategy::StrategyName,
};

use super::extract::complete_within_deadline;
use super::prompts::{format_select_prompt, truncate_chars};
use super::registry::StrategyRegistry;

/// Deterministic strategy for a category, used whenever the oracle fails.
pub fn fallback_strategy(category: DifficultyCategory) -> StrategyName {
    match category {
        DifficultyCategory::HighlyComplex => StrategyName::Recursive,
        DifficultyCategory::Complex => StrategyName::ChainOfThought,
        DifficultyCategory::DebateHeavy => StrategyName::FewShot,
        DifficultyCategory::EvidenceHeavy => StrategyName::RoleBased,
        DifficultyCategory::Simple => StrategyName::Baseline,
    }
}

/// Fallback keyed by a raw category label; unknown labels get baseline.
pub fn fallback_for_label(label: &str) -> StrategyName {
    label
        .parse::<DifficultyCategory>()
        .map(fallback_strategy)
        .unwrap_or(StrategyName::Baseline)
}

/// Build the policy oracle request.
pub fn policy_request(
    registry: &StrategyRegistry,
    config: &OrchestratorConfig,
    model: &str,
    text: &str,
    category: DifficultyCategory,
) -> CompletionRequest {
    let options: Vec<&str> = registry.names().map(|n| n.as_str()).collect();
    let preview = truncate_chars(text, config.preview_chars);

    CompletionRequest {
        model: model.to_string(),
        prompt: format_select_prompt(category.as_str(), preview, &options),
        temperature: config.policy_temperature,
        max_tokens: config.policy_max_tokens,
        timeout: config.policy_timeout,
    }
}

/// Find the first registry strategy whose name occurs in the reply.
///
/// Matching is substring containment on the lower-cased reply, iterating in
/// registry order. A reply naming several strategies therefore resolves to
/// the earliest one in the registry, not the earliest in the reply.
pub fn parse_policy_reply(registry: &StrategyRegistry, reply: &str) -> Option<StrategyName> {
    let decision = reply.trim().to_lowercase();
    registry.names().find(|name| decision.contains(name.as_str()))
}

/// Choose a strategy for an article. Never fails.
pub async fn select<E: GenerativeEngine + ?Sized>(
    engine: &E,
    registry: &StrategyRegistry,
    config: &OrchestratorConfig,
    model: &str,
    text: &str,
    category: DifficultyCategory,
) -> StrategyName {
    let request = policy_request(registry, config, model, text, category);

    match complete_within_deadline(engine, request).await {
        Ok(reply) => match parse_policy_reply(registry, &reply) {
            Some(strategy) => {
                debug!(model = %model, category = %category, strategy = %strategy, "Policy oracle chose strategy");
                strategy
            }
            None => {
                let strategy = fallback_strategy(category);
                warn!(
                    model = %model,
                    category = %category,
                    reply = %truncate_chars(&reply, 80),
                    fallback = %strategy,
                    "Policy reply named no known strategy, using fallback"
                );
                strategy
            }
        },
        Err(e) => {
            let strategy = fallback_strategy(category);
            warn!(
                model = %model,
                category = %category,
                error = %e,
                fallback = %strategy,
                "Policy oracle failed, using fallback"
            );
            strategy
        }
    }
}
