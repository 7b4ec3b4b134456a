//! Testing utilities including a scripted engine.
//!
//! These are useful for testing applications that use the orchestrator
//! without making real LLM calls.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ExtractionError, Result};
use crate::pipeline::registry::StrategyRegistry;
use crate::traits::engine::{CompletionRequest, GenerativeEngine};
use crate::types::{argument_map::ArgumentMap, strategy::StrategyName};

/// First line of the policy prompt, used to tell policy calls apart.
const POLICY_PROMPT_MARKER: &str = "Choose the BEST extraction strategy";

/// A scripted engine reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text
    Text(String),
    /// Fail with an engine error carrying this message
    Fail(String),
    /// Sleep, then produce the inner reply
    Delayed(Duration, Box<MockReply>),
}

impl MockReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail(message.into())
    }

    /// A reply wrapping the map's JSON in some chatty prose.
    pub fn map(map: &ArgumentMap) -> Self {
        Self::Text(canned_reply(map))
    }

    pub fn delayed(delay: Duration, reply: MockReply) -> Self {
        Self::Delayed(delay, Box::new(reply))
    }
}

/// Which kind of call the engine received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCallKind {
    Policy,
    Extraction,
}

/// Record of a call made to the mock engine.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub kind: MockCallKind,
    /// Strategy whose template rendered the prompt (extraction calls)
    pub strategy: Option<StrategyName>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub prompt: String,
}

/// A mock engine with scripted replies.
///
/// Substring rules are checked first, in the order they were added.
/// Policy calls are answered from the policy queue, then the fixed policy
/// reply; with neither they fail, which sends the selector to its fallback.
/// Extraction calls are answered by a per-strategy reply if one is set,
/// otherwise from the extraction queue in FIFO order; an exhausted queue
/// fails.
#[derive(Default, Clone)]
pub struct MockEngine {
    rules: Vec<(String, MockReply)>,
    policy_queue: Arc<Mutex<VecDeque<MockReply>>>,
    policy_default: Option<MockReply>,
    extraction_queue: Arc<Mutex<VecDeque<MockReply>>>,
    by_strategy: HashMap<StrategyName, MockReply>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockEngine {
    /// Create a new mock engine with no scripted replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer any prompt containing `pattern` with `reply`.
    pub fn with_rule(mut self, pattern: impl Into<String>, reply: MockReply) -> Self {
        self.rules.push((pattern.into(), reply));
        self
    }

    /// Answer every policy call with this text.
    pub fn with_policy_reply(mut self, reply: impl Into<String>) -> Self {
        self.policy_default = Some(MockReply::Text(reply.into()));
        self
    }

    /// Queue one policy reply, consumed before the fixed reply.
    pub fn then_policy(self, reply: MockReply) -> Self {
        self.policy_queue.lock().unwrap().push_back(reply);
        self
    }

    /// Queue one extraction reply.
    pub fn then_extraction(self, reply: MockReply) -> Self {
        self.extraction_queue.lock().unwrap().push_back(reply);
        self
    }

    /// Queue an extraction reply carrying this map.
    pub fn then_map(self, map: &ArgumentMap) -> Self {
        self.then_extraction(MockReply::map(map))
    }

    /// Always answer extractions with this strategy's template this way.
    pub fn with_strategy_reply(mut self, strategy: StrategyName, reply: MockReply) -> Self {
        self.by_strategy.insert(strategy, reply);
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls of one kind.
    pub fn calls_of(&self, kind: MockCallKind) -> Vec<MockCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.kind == kind)
            .collect()
    }

    /// Strategies of extraction calls, in call order.
    pub fn extraction_strategies(&self) -> Vec<StrategyName> {
        self.calls_of(MockCallKind::Extraction)
            .into_iter()
            .filter_map(|c| c.strategy)
            .collect()
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn next_reply(
        &self,
        prompt: &str,
        kind: MockCallKind,
        strategy: Option<StrategyName>,
    ) -> MockReply {
        if let Some((_, reply)) = self.rules.iter().find(|(p, _)| prompt.contains(p.as_str())) {
            return reply.clone();
        }

        match kind {
            MockCallKind::Policy => self
                .policy_queue
                .lock()
                .unwrap()
                .pop_front()
                .or_else(|| self.policy_default.clone())
                .unwrap_or_else(|| MockReply::fail("no policy reply scripted")),
            MockCallKind::Extraction => strategy
                .and_then(|s| self.by_strategy.get(&s).cloned())
                .or_else(|| self.extraction_queue.lock().unwrap().pop_front())
                .unwrap_or_else(|| MockReply::fail("no extraction reply scripted")),
        }
    }
}

#[async_trait]
impl GenerativeEngine for MockEngine {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let kind = if request.prompt.starts_with(POLICY_PROMPT_MARKER) {
            MockCallKind::Policy
        } else {
            MockCallKind::Extraction
        };
        let strategy = match kind {
            MockCallKind::Policy => None,
            MockCallKind::Extraction => strategy_of_prompt(&request.prompt),
        };

        self.calls.lock().unwrap().push(MockCall {
            kind,
            strategy,
            model: request.model.clone(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            timeout: request.timeout,
            prompt: request.prompt.clone(),
        });

        let mut reply = self.next_reply(&request.prompt, kind, strategy);
        loop {
            match reply {
                MockReply::Text(text) => return Ok(text),
                MockReply::Fail(message) => return Err(ExtractionError::engine(message)),
                MockReply::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    reply = *inner;
                }
            }
        }
    }
}

/// Identify which registry template rendered a prompt.
pub fn strategy_of_prompt(prompt: &str) -> Option<StrategyName> {
    StrategyRegistry::standard()
        .iter()
        .find(|spec| {
            spec.template
                .lines()
                .next()
                .is_some_and(|first| prompt.starts_with(first))
        })
        .map(|spec| spec.name)
}

/// Render a map the way chatty models tend to: prose around a JSON object.
pub fn canned_reply(map: &ArgumentMap) -> String {
    format!(
        "Here is the extracted argument structure:\n\n{}\n\nLet me know if you need anything else.",
        serde_json::to_string_pretty(map).unwrap_or_default()
    )
}

/// A map scoring exactly `tenths / 10`, for loop tests.
///
/// Supports the reachable scores 0.0 to 1.0 except 0.3, 0.5 and 0.7, which
/// need the counterargument bonus; those use it too.
pub fn map_with_quality(tenths: u32) -> ArgumentMap {
    let thesis = ArgumentMap::empty().with_thesis(["The policy works"]);
    match tenths {
        0 => ArgumentMap::empty(),
        1 => ArgumentMap::empty().with_counterarguments(["Critics disagree"]),
        2 => ArgumentMap::empty().with_evidence(["A 2023 survey"]),
        3 => ArgumentMap::empty()
            .with_evidence(["A 2023 survey"])
            .with_counterarguments(["Critics disagree"]),
        4 => thesis,
        5 => thesis.with_counterarguments(["Critics disagree"]),
        6 => thesis.with_evidence(["A 2023 survey"]),
        7 => thesis
            .with_evidence(["A 2023 survey"])
            .with_counterarguments(["Critics disagree"]),
        8 => thesis.with_supporting_claims(["It cut costs", "It saved time"]),
        9 => thesis
            .with_supporting_claims(["It cut costs", "It saved time"])
            .with_counterarguments(["Critics disagree"]),
        _ => thesis
            .with_supporting_claims(["It cut costs", "It saved time"])
            .with_evidence(["A 2023 survey"]),
    }
}
