//! Integration tests for the adaptive extraction loop.
//!
//! These tests drive the orchestrator end to end against a scripted engine:
//! 1. Classify the article
//! 2. Select a strategy (oracle or fallback)
//! 3. Extract and repair the reply
//! 4. Validate and accept or retry

use std::time::Duration;

use argument_extraction::{
    testing::{map_with_quality, MockCallKind},
    ArgumentMap, DecisionLog, DifficultyCategory, MockEngine, MockReply, Orchestrator,
    OrchestratorConfig, QualityScore, StrategyName,
};

/// Counter and evidence signals, short: classifies as complex.
const COMPLEX_ARTICLE: &str =
    "Remote work raises output. A 2023 study of 500 firms found gains. Critics disagree.";

/// No signals at all: classifies as simple.
const SIMPLE_ARTICLE: &str = "Cities should plant more trees along their streets.";

fn orchestrator(engine: &MockEngine) -> Orchestrator<MockEngine> {
    Orchestrator::new(engine.clone(), "llama3.1")
}

#[tokio::test]
async fn test_selector_falls_back_when_oracle_times_out() {
    let engine = MockEngine::new().then_policy(MockReply::delayed(
        Duration::from_secs(5),
        MockReply::text("few_shot"),
    ));
    let config = OrchestratorConfig::default().with_policy_timeout(Duration::from_millis(20));
    let orchestrator = Orchestrator::with_config(engine.clone(), "llama3.1", config);

    let category = orchestrator.classify(COMPLEX_ARTICLE);
    assert_eq!(category, DifficultyCategory::Complex);

    let strategy = orchestrator.select(COMPLEX_ARTICLE, category).await;
    assert_eq!(strategy, StrategyName::ChainOfThought);
}

#[tokio::test]
async fn test_selector_uses_oracle_reply() {
    let engine = MockEngine::new().with_policy_reply("Structured_Output");
    let orchestrator = orchestrator(&engine);

    let strategy = orchestrator
        .select(SIMPLE_ARTICLE, DifficultyCategory::Simple)
        .await;

    assert_eq!(strategy, StrategyName::StructuredOutput);
    let policy_calls = engine.calls_of(MockCallKind::Policy);
    assert_eq!(policy_calls.len(), 1);
    assert_eq!(policy_calls[0].temperature, 0.1);
    assert_eq!(policy_calls[0].max_tokens, 50);
}

#[tokio::test]
async fn test_selector_falls_back_on_unknown_label() {
    let engine = MockEngine::new().with_policy_reply("use your best judgement");
    let orchestrator = orchestrator(&engine);

    let strategy = orchestrator
        .select(SIMPLE_ARTICLE, DifficultyCategory::EvidenceHeavy)
        .await;

    assert_eq!(strategy, StrategyName::RoleBased);
}

#[tokio::test]
async fn test_retry_returns_second_attempt_when_first_is_weak() {
    let engine = MockEngine::new()
        .with_policy_reply("baseline")
        .then_map(&map_with_quality(3))
        .then_map(&map_with_quality(7));
    let orchestrator = orchestrator(&engine);

    let outcome = orchestrator.process(SIMPLE_ARTICLE, "a1").await;

    assert_eq!(outcome.attempts, 2);
    assert_eq!(outcome.quality.value(), 0.7);
    assert_eq!(outcome.argument_map, map_with_quality(7));
    assert_eq!(outcome.decisions.len(), 2);

    let qualities: Vec<f64> = outcome
        .decisions
        .entries()
        .iter()
        .map(|e| e.quality_score.value())
        .collect();
    assert_eq!(qualities, vec![0.3, 0.7]);
    assert_eq!(engine.calls_of(MockCallKind::Extraction).len(), 2);
}

#[tokio::test]
async fn test_accepts_first_attempt_and_never_runs_second() {
    let engine = MockEngine::new()
        .with_policy_reply("recursive")
        .then_map(&map_with_quality(9))
        .then_map(&map_with_quality(1));
    let orchestrator = orchestrator(&engine);

    let outcome = orchestrator.process(COMPLEX_ARTICLE, "a2").await;

    assert_eq!(outcome.attempts, 1);
    assert_eq!(outcome.quality.value(), 0.9);
    assert_eq!(outcome.strategy, StrategyName::Recursive);
    assert!(outcome.accepted(0.6));
    assert_eq!(outcome.decisions.len(), 1);
    assert_eq!(engine.calls_of(MockCallKind::Extraction).len(), 1);
    assert_eq!(engine.calls_of(MockCallKind::Policy).len(), 1);
}

#[tokio::test]
async fn test_last_attempt_returned_even_when_earlier_scored_higher() {
    let engine = MockEngine::new()
        .with_policy_reply("baseline")
        .then_map(&map_with_quality(5))
        .then_map(&map_with_quality(2));
    let orchestrator = orchestrator(&engine);

    let outcome = orchestrator.process(SIMPLE_ARTICLE, "a3").await;

    assert_eq!(outcome.attempts, 2);
    assert_eq!(outcome.quality.value(), 0.2);
    assert!(!outcome.accepted(0.6));
}

#[tokio::test]
async fn test_loop_is_bounded_by_attempt_budget() {
    let mut engine = MockEngine::new().with_policy_reply("few_shot");
    for _ in 0..10 {
        engine = engine.then_map(&map_with_quality(0));
    }
    let orchestrator = orchestrator(&engine);

    for max_retries in [0, 1, 3, 5] {
        engine.clear_calls();
        let outcome = orchestrator
            .process_with_retries(SIMPLE_ARTICLE, "bounded", max_retries)
            .await;

        let expected = max_retries.max(1);
        assert_eq!(outcome.attempts, expected);
        assert_eq!(outcome.decisions.len(), expected as usize);
        assert!(!outcome.decisions.is_empty());
        assert_eq!(
            engine.calls_of(MockCallKind::Extraction).len(),
            expected as usize
        );
    }
}

#[tokio::test]
async fn test_failed_attempt_before_last_is_not_logged() {
    let engine = MockEngine::new()
        .with_policy_reply("baseline")
        .then_extraction(MockReply::fail("connection reset"))
        .then_map(&map_with_quality(4));
    let orchestrator = orchestrator(&engine);

    let outcome = orchestrator.process(SIMPLE_ARTICLE, "a4").await;

    assert_eq!(outcome.attempts, 2);
    assert_eq!(outcome.decisions.len(), 1);
    assert_eq!(outcome.decisions.entries()[0].attempt, 2);
    assert_eq!(outcome.quality.value(), 0.4);
}

#[tokio::test]
async fn test_unparseable_last_attempt_yields_empty_map() {
    let engine = MockEngine::new()
        .with_policy_reply("baseline")
        .then_map(&map_with_quality(2))
        .then_extraction(MockReply::text("I could not find any arguments, sorry."));
    let orchestrator = orchestrator(&engine);

    let outcome = orchestrator.process(SIMPLE_ARTICLE, "a5").await;

    assert_eq!(outcome.attempts, 2);
    assert!(outcome.argument_map.is_empty());
    assert_eq!(outcome.quality, QualityScore::ZERO);
    assert_eq!(outcome.decisions.len(), 2);
    assert_eq!(
        outcome.decisions.last().map(|e| e.quality_score),
        Some(QualityScore::ZERO)
    );
}

#[tokio::test]
async fn test_every_attempt_failing_logs_only_the_last() {
    let engine = MockEngine::new()
        .with_policy_reply("baseline")
        .then_extraction(MockReply::fail("connection reset"))
        .then_extraction(MockReply::fail("connection reset"));
    let config = OrchestratorConfig::default().with_max_retries(2);
    let orchestrator = Orchestrator::with_config(engine.clone(), "llama3.1", config);

    let outcome = orchestrator.process(SIMPLE_ARTICLE, "a7").await;

    assert_eq!(outcome.attempts, 2);
    assert!(outcome.argument_map.is_empty());
    assert_eq!(outcome.decisions.len(), 1);
    let entry = &outcome.decisions.entries()[0];
    assert_eq!(entry.attempt, 2);
    assert_eq!(entry.quality_score.value(), 0.0);
    assert_eq!(engine.calls_of(MockCallKind::Extraction).len(), 2);
}

#[tokio::test]
async fn test_single_attempt_failure_still_logs_one_entry() {
    let engine = MockEngine::new().then_extraction(MockReply::fail("boom"));
    let config = OrchestratorConfig::default().with_max_retries(1);
    let orchestrator = Orchestrator::with_config(engine.clone(), "gemma2", config);

    let outcome = orchestrator.process(SIMPLE_ARTICLE, "a6").await;

    // No policy reply scripted: the selector falls back to baseline.
    assert_eq!(outcome.strategy, StrategyName::Baseline);
    assert_eq!(outcome.attempts, 1);
    assert_eq!(outcome.decisions.len(), 1);
    assert!(outcome.argument_map.is_empty());
}

#[tokio::test]
async fn test_extraction_timeout_is_absorbed() {
    let engine = MockEngine::new()
        .with_policy_reply("baseline")
        .then_extraction(MockReply::delayed(
            Duration::from_secs(5),
            MockReply::map(&map_with_quality(10)),
        ));
    let config = OrchestratorConfig::default()
        .with_max_retries(1)
        .with_extraction_timeout(Duration::from_millis(20));
    let orchestrator = Orchestrator::with_config(engine.clone(), "llama3.2", config);

    let outcome = orchestrator.process(SIMPLE_ARTICLE, "slow").await;

    assert!(outcome.argument_map.is_empty());
    assert_eq!(outcome.quality, QualityScore::ZERO);
}

#[tokio::test]
async fn test_decision_entries_carry_article_context() {
    let engine = MockEngine::new()
        .with_policy_reply("contrastive")
        .then_map(&map_with_quality(10));
    let orchestrator = orchestrator(&engine);

    let outcome = orchestrator.process(COMPLEX_ARTICLE, "article-42").await;

    let entry = &outcome.decisions.entries()[0];
    assert_eq!(entry.source_id, "article-42");
    assert_eq!(entry.model, "llama3.1");
    assert_eq!(entry.article_type, DifficultyCategory::Complex);
    assert_eq!(entry.attempt, 1);
    assert_eq!(entry.strategy_chosen, StrategyName::Contrastive);
    assert_eq!(entry.quality_score, QualityScore::MAX);
}

#[tokio::test]
async fn test_decision_logs_accumulate_across_articles() {
    let engine = MockEngine::new()
        .with_policy_reply("baseline")
        .then_map(&map_with_quality(10))
        .then_map(&map_with_quality(0))
        .then_map(&map_with_quality(8));
    let orchestrator = orchestrator(&engine);

    let mut log = DecisionLog::new();
    log.extend(orchestrator.process(SIMPLE_ARTICLE, "first").await.decisions);
    log.extend(orchestrator.process(SIMPLE_ARTICLE, "second").await.decisions);

    let sources: Vec<&str> = log.entries().iter().map(|e| e.source_id.as_str()).collect();
    assert_eq!(sources, vec!["first", "second", "second"]);

    let summary = log.summary(0.6);
    assert_eq!(summary.attempts, 3);
}

#[tokio::test]
async fn test_extraction_prompt_truncates_article() {
    let engine = MockEngine::new()
        .with_policy_reply("baseline")
        .then_map(&map_with_quality(10));
    let orchestrator = orchestrator(&engine);
    let article = "é".repeat(5000);

    orchestrator.process(&article, "long").await;

    let call = &engine.calls_of(MockCallKind::Extraction)[0];
    assert!(call.prompt.contains(&"é".repeat(3500)));
    assert!(!call.prompt.contains(&"é".repeat(3501)));
    assert_eq!(call.max_tokens, 1500);
    assert_eq!(call.temperature, 0.2);

    let policy = &engine.calls_of(MockCallKind::Policy)[0];
    assert!(policy.prompt.contains(&"é".repeat(300)));
    assert!(!policy.prompt.contains(&"é".repeat(301)));
}

#[tokio::test]
async fn test_process_multi_dedups_and_skips_failures() {
    let engine = MockEngine::new()
        .with_strategy_reply(
            StrategyName::ChainOfThought,
            MockReply::map(&ArgumentMap::empty().with_thesis(["X", "Y"])),
        )
        .with_strategy_reply(
            StrategyName::FewShot,
            MockReply::map(
                &ArgumentMap::empty()
                    .with_thesis(["Y", "Z"])
                    .with_evidence(["A 2023 survey"]),
            ),
        )
        .with_strategy_reply(StrategyName::Recursive, MockReply::fail("rate limited"));
    let orchestrator = orchestrator(&engine);

    let merged = orchestrator.process_multi(COMPLEX_ARTICLE, "multi").await;

    assert_eq!(merged.thesis, vec!["X", "Y", "Z"]);
    assert_eq!(merged.evidence, vec!["A 2023 survey"]);
    assert!(merged.counterarguments.is_empty());
    assert_eq!(
        engine.extraction_strategies(),
        vec![
            StrategyName::ChainOfThought,
            StrategyName::FewShot,
            StrategyName::Recursive
        ]
    );
    assert!(engine.calls_of(MockCallKind::Policy).is_empty());
}

#[tokio::test]
async fn test_process_multi_all_failing_is_empty() {
    let engine = MockEngine::new();
    let orchestrator = orchestrator(&engine);

    let merged = orchestrator.process_multi(SIMPLE_ARTICLE, "none").await;

    assert!(merged.is_empty());
}

#[tokio::test]
async fn test_sweep_runs_every_strategy_in_order() {
    let engine = MockEngine::new()
        .with_strategy_reply(StrategyName::RoleBased, MockReply::fail("overloaded"))
        .with_strategy_reply(
            StrategyName::StructuredOutput,
            MockReply::map(&map_with_quality(10)),
        );
    let mut engine = engine;
    for _ in 0..5 {
        engine = engine.then_map(&map_with_quality(4));
    }
    let orchestrator = orchestrator(&engine);

    let outcomes = orchestrator.sweep(SIMPLE_ARTICLE, "sweep").await;

    let order: Vec<StrategyName> = outcomes.iter().map(|o| o.strategy).collect();
    assert_eq!(order, StrategyName::ALL.to_vec());

    let role = &outcomes[3];
    assert_eq!(role.strategy, StrategyName::RoleBased);
    assert!(role.argument_map.is_none());
    assert!(role.quality.is_none());

    let structured = &outcomes[5];
    assert_eq!(structured.quality, Some(QualityScore::MAX));

    let temperatures: Vec<f32> = engine
        .calls_of(MockCallKind::Extraction)
        .iter()
        .map(|c| c.temperature)
        .collect();
    assert_eq!(temperatures, vec![0.2, 0.2, 0.3, 0.2, 0.2, 0.1, 0.3]);
}

#[tokio::test]
async fn test_orchestrator_serves_concurrent_articles() {
    let engine = MockEngine::new()
        .with_policy_reply("baseline")
        .with_strategy_reply(StrategyName::Baseline, MockReply::map(&map_with_quality(10)));
    let orchestrator = std::sync::Arc::new(orchestrator(&engine));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let orchestrator = orchestrator.clone();
            tokio::spawn(async move {
                orchestrator
                    .process(SIMPLE_ARTICLE, &format!("article-{i}"))
                    .await
            })
        })
        .collect();

    for handle in handles {
        let outcome = handle.await.unwrap();
        assert_eq!(outcome.quality, QualityScore::MAX);
        assert_eq!(outcome.decisions.len(), 1);
    }
}
