//! Decision-log records produced by the retry loop.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{difficulty::DifficultyCategory, quality::QualityScore, strategy::StrategyName};

/// One scored attempt of the retry loop. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionLogEntry {
    pub source_id: String,
    pub model: String,
    pub article_type: DifficultyCategory,
    /// 1-based attempt number
    pub attempt: u32,
    pub strategy_chosen: StrategyName,
    pub quality_score: QualityScore,
}

/// Append-only accumulator of decision-log entries.
///
/// Each `process` call owns a fresh log and hands it back; callers merge
/// per-article logs with [`DecisionLog::extend`] once an article is done,
/// which keeps each article's attempts contiguous and ordered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionLog {
    entries: Vec<DecisionLogEntry>,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry.
    pub fn push(&mut self, entry: DecisionLogEntry) {
        self.entries.push(entry);
    }

    /// Append every entry of another log, preserving its order.
    pub fn extend(&mut self, other: DecisionLog) {
        self.entries.extend(other.entries);
    }

    pub fn entries(&self) -> &[DecisionLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry that decided the outcome of the most recent article.
    pub fn last(&self) -> Option<&DecisionLogEntry> {
        self.entries.last()
    }

    /// Aggregate statistics over every entry.
    pub fn summary(&self, acceptance_threshold: f64) -> DecisionSummary {
        let mut per_strategy: BTreeMap<StrategyName, StrategyStats> = BTreeMap::new();
        let mut per_category: BTreeMap<String, BTreeMap<StrategyName, usize>> = BTreeMap::new();
        let mut quality_total = 0.0;
        let mut accepted = 0;

        for entry in &self.entries {
            let quality = entry.quality_score.value();
            quality_total += quality;
            if entry.quality_score.meets(acceptance_threshold) {
                accepted += 1;
            }

            let stats = per_strategy.entry(entry.strategy_chosen).or_default();
            stats.picks += 1;
            stats.quality_total += quality;

            *per_category
                .entry(entry.article_type.as_str().to_string())
                .or_default()
                .entry(entry.strategy_chosen)
                .or_default() += 1;
        }

        let attempts = self.entries.len();
        DecisionSummary {
            attempts,
            mean_quality: mean(quality_total, attempts),
            acceptance_rate: mean(accepted as f64, attempts),
            strategies: per_strategy
                .into_iter()
                .map(|(name, stats)| {
                    (
                        name,
                        StrategySummary {
                            picks: stats.picks,
                            mean_quality: mean(stats.quality_total, stats.picks),
                        },
                    )
                })
                .collect(),
            picks_by_category: per_category,
        }
    }
}

impl IntoIterator for DecisionLog {
    type Item = DecisionLogEntry;
    type IntoIter = std::vec::IntoIter<DecisionLogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[derive(Default)]
struct StrategyStats {
    picks: usize,
    quality_total: f64,
}

fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Statistics over a decision log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionSummary {
    /// Scored attempts in the log
    pub attempts: usize,
    /// Mean quality over all attempts
    pub mean_quality: f64,
    /// Fraction of attempts at or above the acceptance threshold
    pub acceptance_rate: f64,
    /// Pick count and mean quality per chosen strategy
    pub strategies: BTreeMap<StrategyName, StrategySummary>,
    /// Strategy pick counts per difficulty label
    pub picks_by_category: BTreeMap<String, BTreeMap<StrategyName, usize>>,
}

/// Per-strategy slice of a [`DecisionSummary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategySummary {
    pub picks: usize,
    pub mean_quality: f64,
}
