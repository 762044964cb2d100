use serde::{Deserialize, Serialize};

use super::{CausalRelationship, DiagnosticItem};

/// Plain-data copy of a diagnostic graph, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<DiagnosticItem>,
    pub edges: Vec<CausalRelationship>,
}

impl GraphSnapshot {
    pub fn new(nodes: Vec<DiagnosticItem>, edges: Vec<CausalRelationship>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
