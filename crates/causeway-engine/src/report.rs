use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use causeway_core::models::{DiagnosticItem, GraphSnapshot, HistoryEntry, TokenUsage};

/// Result of one diagnosis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisReport {
    pub run_id: Uuid,
    pub task_id: String,
    /// Mitigated root causes, in the order they were fixed.
    pub root_causes: Vec<String>,
    pub summary: String,
    /// Abnormal items still not fixed when the search stopped.
    pub unresolved: Vec<String>,
    /// Items the search gave up on because a limit was hit or nothing was proposed.
    pub abandoned: Vec<String>,
    pub usage: TokenUsage,
    /// The graph as the run left it.
    pub state: GraphSnapshot,
    pub history: Vec<HistoryEntry>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl DiagnosisReport {
    pub fn is_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }

    pub fn item(&self, name: &str) -> Option<&DiagnosticItem> {
        self.state.nodes.iter().find(|item| item.name == name)
    }

    pub fn root_cause_items(&self) -> Vec<&DiagnosticItem> {
        self.root_causes
            .iter()
            .filter_map(|name| self.item(name))
            .collect()
    }
}
