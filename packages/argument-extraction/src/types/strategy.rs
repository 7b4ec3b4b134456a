//! Strategy names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// A named prompting approach.
///
/// The declaration order is the registry order, which the strategy selector
/// uses as its tie-break when a policy reply mentions several names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyName {
    Baseline,
    FewShot,
    ChainOfThought,
    RoleBased,
    Contrastive,
    StructuredOutput,
    Recursive,
}

impl StrategyName {
    /// All strategies in registry order.
    pub const ALL: [StrategyName; 7] = [
        StrategyName::Baseline,
        StrategyName::FewShot,
        StrategyName::ChainOfThought,
        StrategyName::RoleBased,
        StrategyName::Contrastive,
        StrategyName::StructuredOutput,
        StrategyName::Recursive,
    ];

    /// Canonical snake_case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::FewShot => "few_shot",
            Self::ChainOfThought => "chain_of_thought",
            Self::RoleBased => "role_based",
            Self::Contrastive => "contrastive",
            Self::StructuredOutput => "structured_output",
            Self::Recursive => "recursive",
        }
    }
}

impl fmt::Display for StrategyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyName {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == needle)
            .ok_or_else(|| ExtractionError::UnknownStrategy {
                name: s.to_string(),
            })
    }
}
