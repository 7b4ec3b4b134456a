//! Extraction executor: render, call the engine, repair the reply.
//!
//! Engine replies are free-form text that usually, but not always, contain
//! a JSON object. The object is located with a bounded-depth brace scan and
//! then coerced into the canonical [`ArgumentMap`] shape.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ExtractionError, Result};
use crate::traits::engine::{CompletionRequest, GenerativeEngine};
use crate::types::{
    argument_map::{ArgumentField, ArgumentMap},
    config::OrchestratorConfig,
    strategy::StrategyName,
};

use super::prompts::{render_template, truncate_chars};
use super::registry::StrategyRegistry;

/// Outermost object plus at most one level of nested `{...}` groups.
pub const MAX_BRACE_DEPTH: usize = 2;

/// Build the engine request for one strategy.
pub fn extraction_request(
    registry: &StrategyRegistry,
    config: &OrchestratorConfig,
    model: &str,
    text: &str,
    strategy: StrategyName,
) -> CompletionRequest {
    let spec = registry.get(strategy);
    let body = truncate_chars(text, config.max_input_chars);

    CompletionRequest {
        model: model.to_string(),
        prompt: render_template(spec.template, body),
        temperature: spec.temperature,
        max_tokens: config.extraction_max_tokens,
        timeout: config.extraction_timeout,
    }
}

/// Run one extraction attempt.
///
/// Returns either a fully normalized map or the reason the attempt failed;
/// never a partially normalized map.
pub async fn extract<E: GenerativeEngine + ?Sized>(
    engine: &E,
    registry: &StrategyRegistry,
    config: &OrchestratorConfig,
    model: &str,
    text: &str,
    strategy: StrategyName,
) -> Result<ArgumentMap> {
    let request = extraction_request(registry, config, model, text, strategy);
    let reply = complete_within_deadline(engine, request).await?;

    debug!(
        model = %model,
        strategy = %strategy,
        reply_len = reply.len(),
        "Extraction reply received"
    );

    parse_argument_map(&reply)
}

/// Call the engine, enforcing the request's deadline regardless of whether
/// the engine implementation honors it.
pub async fn complete_within_deadline<E: GenerativeEngine + ?Sized>(
    engine: &E,
    request: CompletionRequest,
) -> Result<String> {
    let after = request.timeout;
    match tokio::time::timeout(after, engine.complete(request)).await {
        Ok(result) => result,
        Err(_) => Err(ExtractionError::Timeout { after }),
    }
}

/// Locate, parse and normalize the argument map in an engine reply.
pub fn parse_argument_map(reply: &str) -> Result<ArgumentMap> {
    let span = find_json_object(reply).ok_or(ExtractionError::NoJsonObject)?;
    let value: Value = serde_json::from_str(span)?;
    let object = value.as_object().ok_or(ExtractionError::NotAnObject)?;
    Ok(normalize_argument_map(object))
}

/// Find the first `{...}` span whose nesting never exceeds [`MAX_BRACE_DEPTH`].
///
/// Candidates are tried left to right; a candidate that nests too deeply or
/// never closes is abandoned and the scan resumes at the next `{`. Braces
/// inside JSON strings are counted like any other, so surrounding prose is
/// tolerated but this is not a JSON parser.
pub fn find_json_object(reply: &str) -> Option<&str> {
    let bytes = reply.as_bytes();
    let mut from = 0;

    while let Some(offset) = bytes[from..].iter().position(|&b| b == b'{') {
        let open = from + offset;
        if let Some(close) = balanced_close(bytes, open) {
            // Both ends are ASCII braces, so the slice is on char boundaries.
            return Some(&reply[open..=close]);
        }
        from = open + 1;
    }

    None
}

fn balanced_close(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;

    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => {
                depth += 1;
                if depth > MAX_BRACE_DEPTH {
                    return None;
                }
            }
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

/// Coerce an engine object into the canonical map.
///
/// Best effort and total: missing fields become empty, scalars are wrapped,
/// nested objects and lists are flattened to space-joined text, and blank
/// items are dropped. Applying it to an already canonical map is a no-op.
pub fn normalize_argument_map(object: &Map<String, Value>) -> ArgumentMap {
    let mut map = ArgumentMap::empty();

    for field in ArgumentField::ALL {
        let items = match object.get(field.key()) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.iter().filter_map(normalize_item).collect(),
            Some(single) => normalize_item(single).into_iter().collect(),
        };
        *map.field_mut(field) = items;
    }

    map
}

/// One field element as trimmed text, or `None` when it is blank.
fn normalize_item(value: &Value) -> Option<String> {
    let text = flatten(value);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Render any JSON value as flat text, joining nested parts with spaces and
/// skipping empty ones.
fn flatten(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => join_non_empty(items.iter()),
        Value::Object(fields) => join_non_empty(fields.values()),
    }
}

fn join_non_empty<'a>(values: impl Iterator<Item = &'a Value>) -> String {
    values
        .map(flatten)
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.trim().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
