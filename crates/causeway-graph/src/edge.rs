use serde::{Deserialize, Serialize};

/// Edge weight stored in the graph.
///
/// `seq` is the global insertion counter. Edge indices are recycled by the
/// stable graph after removals, so ordering uses `seq` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CausalEdge {
    pub description: String,
    pub seq: u64,
}

impl CausalEdge {
    pub fn new(description: impl Into<String>, seq: u64) -> Self {
        Self {
            description: description.into(),
            seq,
        }
    }
}
