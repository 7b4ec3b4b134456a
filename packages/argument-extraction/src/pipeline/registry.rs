//! Strategy registry: the fixed catalogue of prompting strategies.

use crate::types::strategy::StrategyName;

use super::prompts::{
    BASELINE_PROMPT, CHAIN_OF_THOUGHT_PROMPT, CONTRASTIVE_PROMPT, FEW_SHOT_PROMPT,
    RECURSIVE_PROMPT, ROLE_BASED_PROMPT, STRUCTURED_OUTPUT_PROMPT,
};

/// Template and sampling temperature for one strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategySpec {
    pub name: StrategyName,
    pub template: &'static str,
    /// Sampling temperature in `[0, 1]`; lower is more deterministic
    pub temperature: f32,
}

/// Entries in registry order. Selection tie-breaks iterate this order.
static STANDARD_STRATEGIES: [StrategySpec; 7] = [
    StrategySpec {
        name: StrategyName::Baseline,
        template: BASELINE_PROMPT,
        temperature: 0.2,
    },
    StrategySpec {
        name: StrategyName::FewShot,
        template: FEW_SHOT_PROMPT,
        temperature: 0.2,
    },
    StrategySpec {
        name: StrategyName::ChainOfThought,
        template: CHAIN_OF_THOUGHT_PROMPT,
        temperature: 0.3,
    },
    StrategySpec {
        name: StrategyName::RoleBased,
        template: ROLE_BASED_PROMPT,
        temperature: 0.2,
    },
    StrategySpec {
        name: StrategyName::Contrastive,
        template: CONTRASTIVE_PROMPT,
        temperature: 0.2,
    },
    StrategySpec {
        name: StrategyName::StructuredOutput,
        template: STRUCTURED_OUTPUT_PROMPT,
        temperature: 0.1,
    },
    StrategySpec {
        name: StrategyName::Recursive,
        template: RECURSIVE_PROMPT,
        temperature: 0.3,
    },
];

/// Read-only view over the process-wide strategy table.
///
/// There is no way to add or remove entries; every [`StrategyName`] has
/// exactly one spec.
#[derive(Debug, Clone, Copy)]
pub struct StrategyRegistry {
    entries: &'static [StrategySpec],
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl StrategyRegistry {
    /// The standard seven-strategy catalogue.
    pub fn standard() -> Self {
        Self {
            entries: &STANDARD_STRATEGIES,
        }
    }

    /// Look up a strategy's template and temperature.
    pub fn get(&self, name: StrategyName) -> &'static StrategySpec {
        // Table is indexed by declaration order; the test below pins that.
        &self.entries[name as usize]
    }

    /// Strategy names in registry order.
    pub fn names(&self) -> impl Iterator<Item = StrategyName> + '_ {
        self.entries.iter().map(|spec| spec.name)
    }

    /// Specs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &'static StrategySpec> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
