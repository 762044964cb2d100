use std::path::Path;

use causeway_core::errors::{CausewayError, CausewayResult};
use causeway_core::models::{GraphSnapshot, HistoryAction, HistoryEntry, TokenUsage};
use causeway_core::traits::{Extraction, InitialExtractor};

/// Serves a fixed initial graph instead of reading a rule report.
///
/// Used to re-run the search over the starting graph of an earlier run, and
/// by deterministic replay tests.
#[derive(Debug, Clone, Default)]
pub struct SnapshotExtractor {
    graph: GraphSnapshot,
    usage: TokenUsage,
}

impl SnapshotExtractor {
    pub fn new(graph: GraphSnapshot) -> Self {
        Self {
            graph,
            usage: TokenUsage::default(),
        }
    }

    /// Load a `GraphSnapshot` JSON file.
    pub fn load(path: &Path) -> CausewayResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CausewayError::io(path.display().to_string(), e))?;
        Ok(Self::new(serde_json::from_str(&raw)?))
    }

    /// The starting graph recorded in a run history.
    pub fn from_history(history: &[HistoryEntry]) -> Option<Self> {
        history
            .iter()
            .find(|entry| entry.action == HistoryAction::CausalAnalysis)
            .map(|entry| Self {
                graph: entry.snapshot.clone(),
                usage: entry.usage,
            })
    }

    pub fn graph(&self) -> &GraphSnapshot {
        &self.graph
    }
}

impl InitialExtractor for SnapshotExtractor {
    fn extract(&mut self, task_id: &str) -> CausewayResult<Extraction> {
        tracing::debug!(task_id = %task_id, items = self.graph.nodes.len(), "serving stored initial graph");
        Ok(Extraction {
            graph: self.graph.clone(),
            usage: self.usage,
        })
    }
}
