use serde::{Deserialize, Serialize};

use super::defaults;

/// Bounds and sampling for the root-cause search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Independent oracle samples merged per expansion.
    pub consistency_samples: usize,
    /// Deepest expansion level below a selected item. Deeper items are abandoned.
    pub max_expansion_depth: usize,
    /// How many times one item may be expanded in a run.
    pub max_expansions_per_item: usize,
    /// Upper bound on top-level select rounds.
    pub max_select_rounds: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            consistency_samples: defaults::DEFAULT_CONSISTENCY_SAMPLES,
            max_expansion_depth: defaults::DEFAULT_MAX_EXPANSION_DEPTH,
            max_expansions_per_item: defaults::DEFAULT_MAX_EXPANSIONS_PER_ITEM,
            max_select_rounds: defaults::DEFAULT_MAX_SELECT_ROUNDS,
        }
    }
}
