//! Quality validation: weighted completeness of an argument map.

use crate::types::{argument_map::ArgumentMap, quality::QualityScore};

// Weights in tenths keep the arithmetic exact (0.4 + 0.4 + 0.2 + 0.1).
const THESIS_WEIGHT: u32 = 4;
const CLAIMS_WEIGHT: u32 = 4;
const EVIDENCE_WEIGHT: u32 = 2;
const COUNTER_BONUS: u32 = 1;

/// Supporting claims needed for the claims component.
pub const MIN_SUPPORTING_CLAIMS: usize = 2;

/// Score a map. Total and pure; an empty map scores 0.0.
pub fn score(map: &ArgumentMap) -> QualityScore {
    let mut tenths = 0;

    if !map.thesis.is_empty() {
        tenths += THESIS_WEIGHT;
    }
    if map.supporting_claims.len() >= MIN_SUPPORTING_CLAIMS {
        tenths += CLAIMS_WEIGHT;
    }
    if !map.evidence.is_empty() {
        tenths += EVIDENCE_WEIGHT;
    }
    if !map.counterarguments.is_empty() {
        tenths += COUNTER_BONUS;
    }

    QualityScore::new(f64::from(tenths) / 10.0)
}

/// Score an optional map; a missing map scores 0.0.
pub fn score_option(map: Option<&ArgumentMap>) -> QualityScore {
    map.map(score).unwrap_or(QualityScore::ZERO)
}
