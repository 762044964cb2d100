use crate::errors::CausewayResult;
use crate::models::{GraphSnapshot, TokenUsage};

/// The initial graph produced for a task.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub graph: GraphSnapshot,
    pub usage: TokenUsage,
}

/// Builds the starting graph from deterministic rule-based checks.
pub trait InitialExtractor: Send {
    fn extract(&mut self, task_id: &str) -> CausewayResult<Extraction>;
}
