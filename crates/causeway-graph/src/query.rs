//! Read-only queries over the diagnostic state.
//!
//! These are also the resolved-item API that reporting layers use:
//! `is_fixed`, `is_abnormal`, `causes_of`, `effects_of`.

use petgraph::stable_graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use causeway_core::errors::GraphError;
use causeway_core::models::{CausalRelationship, DiagnosticItem};

use crate::edge::CausalEdge;
use crate::state::DiagnosticState;

impl DiagnosticState {
    /// Items with an edge pointing at `name`, in edge insertion order.
    pub fn causes_of(&self, name: &str) -> Result<Vec<&DiagnosticItem>, GraphError> {
        self.neighbours(name, Direction::Incoming)
    }

    /// Items `name` points at, in edge insertion order.
    pub fn effects_of(&self, name: &str) -> Result<Vec<&DiagnosticItem>, GraphError> {
        self.neighbours(name, Direction::Outgoing)
    }

    /// Outgoing edges of `name`.
    pub fn relationships_from(&self, name: &str) -> Result<Vec<CausalRelationship>, GraphError> {
        self.edges(name, Direction::Outgoing)
    }

    /// Incoming edges of `name`.
    pub fn relationships_to(&self, name: &str) -> Result<Vec<CausalRelationship>, GraphError> {
        self.edges(name, Direction::Incoming)
    }

    pub fn relationship(&self, cause: &str, effect: &str) -> Option<CausalRelationship> {
        let source = self.node(cause).ok()?;
        let target = self.node(effect).ok()?;
        let edge = self.graph.find_edge(source, target)?;
        let weight = self.graph.edge_weight(edge)?;
        Some(self.to_relationship(source, target, weight))
    }

    /// The one edge a suspect must have before it can be verified.
    pub fn sole_effect(&self, name: &str) -> Result<CausalRelationship, GraphError> {
        let mut edges = self.relationships_from(name)?;
        if edges.len() != 1 {
            return Err(GraphError::EffectCountMismatch {
                name: name.to_string(),
                found: edges.len(),
            });
        }
        edges.pop().ok_or_else(|| GraphError::EffectCountMismatch {
            name: name.to_string(),
            found: 0,
        })
    }

    pub fn is_fixed(&self, name: &str) -> Result<bool, GraphError> {
        Ok(self.item(name)?.is_fixed())
    }

    pub fn is_abnormal(&self, name: &str) -> Result<bool, GraphError> {
        Ok(self.item(name)?.is_abnormal())
    }

    /// True iff every item with an abnormal severity is fixed.
    pub fn is_resolved(&self) -> bool {
        self.items().all(|item| !item.is_abnormal() || item.is_fixed())
    }

    /// Items not yet fixed, in discovery order.
    pub fn unfixed(&self) -> Vec<&DiagnosticItem> {
        self.items().filter(|item| !item.is_fixed()).collect()
    }

    /// Abnormal items that still block resolution.
    pub fn blocking(&self) -> Vec<&DiagnosticItem> {
        self.items()
            .filter(|item| item.is_abnormal() && !item.is_fixed())
            .collect()
    }

    fn neighbours(&self, name: &str, dir: Direction) -> Result<Vec<&DiagnosticItem>, GraphError> {
        Ok(self
            .linked(name, dir)?
            .into_iter()
            .filter_map(|(idx, _)| self.graph.node_weight(idx))
            .collect())
    }

    fn edges(&self, name: &str, dir: Direction) -> Result<Vec<CausalRelationship>, GraphError> {
        let idx = self.node(name)?;
        Ok(self
            .linked(name, dir)?
            .into_iter()
            .map(|(other, edge)| match dir {
                Direction::Outgoing => self.to_relationship(idx, other, edge),
                Direction::Incoming => self.to_relationship(other, idx, edge),
            })
            .collect())
    }

    /// Neighbour nodes with the connecting edge, sorted by edge insertion.
    pub(crate) fn linked(
        &self,
        name: &str,
        dir: Direction,
    ) -> Result<Vec<(NodeIndex, &CausalEdge)>, GraphError> {
        let idx = self.node(name)?;
        let mut linked: Vec<_> = self
            .graph
            .edges_directed(idx, dir)
            .map(|e| {
                let other = match dir {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                (other, e.weight())
            })
            .collect();
        linked.sort_by_key(|(_, edge)| edge.seq);
        Ok(linked)
    }
}
