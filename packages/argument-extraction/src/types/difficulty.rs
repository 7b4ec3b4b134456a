//! Difficulty categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Argumentative complexity of an article, derived from cheap lexical signals.
///
/// Computed once per article and never revised between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyCategory {
    /// Long text with both counterarguments and evidence
    HighlyComplex,
    /// Counterarguments and evidence
    Complex,
    /// Counterarguments only
    DebateHeavy,
    /// Evidence only
    EvidenceHeavy,
    /// Neither signal
    Simple,
}

impl DifficultyCategory {
    pub const ALL: [DifficultyCategory; 5] = [
        DifficultyCategory::HighlyComplex,
        DifficultyCategory::Complex,
        DifficultyCategory::DebateHeavy,
        DifficultyCategory::EvidenceHeavy,
        DifficultyCategory::Simple,
    ];

    /// Canonical snake_case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighlyComplex => "highly_complex",
            Self::Complex => "complex",
            Self::DebateHeavy => "debate_heavy",
            Self::EvidenceHeavy => "evidence_heavy",
            Self::Simple => "simple",
        }
    }
}

impl fmt::Display for DifficultyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyCategory {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == needle)
            .ok_or_else(|| ExtractionError::UnknownCategory {
                label: s.to_string(),
            })
    }
}
