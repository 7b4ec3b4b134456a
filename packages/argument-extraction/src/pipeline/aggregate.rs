//! Aggregating mode: run a fixed strategy subset and merge the results.
//!
//! No classification, selection, retry or scoring happens here, and no
//! decision log is produced.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::traits::engine::GenerativeEngine;
use crate::types::argument_map::{ArgumentField, ArgumentMap};

use super::orchestrator::Orchestrator;

/// Merge maps field by field, deduplicating by exact string equality.
///
/// The result has set semantics; items come out in sorted order so the
/// output is stable across runs.
pub fn merge_dedup<'a>(maps: impl IntoIterator<Item = &'a ArgumentMap>) -> ArgumentMap {
    let mut fields: [BTreeSet<&'a str>; 4] = Default::default();

    for map in maps {
        for (slot, field) in fields.iter_mut().zip(ArgumentField::ALL) {
            slot.extend(map.field(field).iter().map(String::as_str));
        }
    }

    let mut merged = ArgumentMap::empty();
    for (slot, field) in fields.into_iter().zip(ArgumentField::ALL) {
        *merged.field_mut(field) = slot.into_iter().map(str::to_string).collect();
    }
    merged
}

impl<E: GenerativeEngine> Orchestrator<E> {
    /// Run every configured aggregate strategy and merge what succeeded.
    ///
    /// Failed strategies contribute nothing; if all fail the result is an
    /// all-empty map.
    pub async fn process_multi(&self, text: &str, source_id: &str) -> ArgumentMap {
        let mut contributions = Vec::with_capacity(self.config().aggregate_strategies.len());

        for &strategy in &self.config().aggregate_strategies {
            match self.extract(text, strategy).await {
                Ok(map) => contributions.push(map),
                Err(e) => {
                    warn!(
                        source_id = %source_id,
                        model = %self.model(),
                        strategy = %strategy,
                        error = %e,
                        "Aggregate strategy failed, skipping"
                    );
                }
            }
        }

        let merged = merge_dedup(&contributions);
        debug!(
            source_id = %source_id,
            model = %self.model(),
            contributions = contributions.len(),
            "Aggregated argument map"
        );
        merged
    }
}
