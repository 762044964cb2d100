use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GraphSnapshot, TokenUsage};

/// One step of a diagnosis run in the append-only history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub step: usize,
    pub action: HistoryAction,
    /// Items the step touched, in the order they were touched.
    pub items: Vec<String>,
    /// Action-specific details.
    pub payload: serde_json::Value,
    /// Full graph after the step was applied.
    pub snapshot: GraphSnapshot,
    pub usage: TokenUsage,
    pub recorded_at: DateTime<Utc>,
}

/// State transitions tracked in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    CausalAnalysis,
    Select,
    Expand,
    Verify,
    Mitigate,
    BackPropagate,
}

impl HistoryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CausalAnalysis => "causal_analysis",
            Self::Select => "select",
            Self::Expand => "expand",
            Self::Verify => "verify",
            Self::Mitigate => "mitigate",
            Self::BackPropagate => "back_propagate",
        }
    }
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
