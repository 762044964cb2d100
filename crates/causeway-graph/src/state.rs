use std::collections::{HashMap, HashSet};

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};

use causeway_core::errors::GraphError;
use causeway_core::models::{CausalRelationship, DiagnosticItem, GraphSnapshot};

use crate::edge::CausalEdge;

/// The mutable causal graph of one diagnosis run.
///
/// Owned by a single search engine for the whole run. Items can be renamed
/// or replaced but never removed otherwise, and `fixed` on an item only
/// ever moves from false to true.
#[derive(Debug, Clone)]
pub struct DiagnosticState {
    pub(crate) graph: StableDiGraph<DiagnosticItem, CausalEdge>,
    pub(crate) index: HashMap<String, NodeIndex>,
    /// Discovery order of the nodes.
    pub(crate) order: Vec<NodeIndex>,
    next_edge_seq: u64,
}

impl Default for DiagnosticState {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticState {
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
            index: HashMap::new(),
            order: Vec::new(),
            next_edge_seq: 0,
        }
    }

    /// Build a state from items and edges, validating both.
    pub fn from_parts(
        items: Vec<DiagnosticItem>,
        relationships: Vec<CausalRelationship>,
    ) -> Result<Self, GraphError> {
        let mut state = Self::new();
        state.append(items, relationships)?;
        Ok(state)
    }

    pub fn from_snapshot(snapshot: GraphSnapshot) -> Result<Self, GraphError> {
        Self::from_parts(snapshot.nodes, snapshot.edges)
    }

    /// Items and edges in discovery order.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::new(self.items().cloned().collect(), self.relationships())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&DiagnosticItem> {
        self.index
            .get(name)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Resolve a name to its item. A missing name is a precondition violation.
    pub fn item(&self, name: &str) -> Result<&DiagnosticItem, GraphError> {
        self.get(name).ok_or_else(|| GraphError::ItemNotFound {
            name: name.to_string(),
        })
    }

    pub fn items(&self) -> impl Iterator<Item = &DiagnosticItem> + '_ {
        self.order
            .iter()
            .filter_map(move |&idx| self.graph.node_weight(idx))
    }

    pub fn names(&self) -> Vec<String> {
        self.items().map(|item| item.name.clone()).collect()
    }

    /// All edges in the order they were added.
    pub fn relationships(&self) -> Vec<CausalRelationship> {
        let mut edges: Vec<_> = self.graph.edge_references().collect();
        edges.sort_by_key(|e| e.weight().seq);
        edges
            .into_iter()
            .map(|e| self.to_relationship(e.source(), e.target(), e.weight()))
            .collect()
    }

    /// Add new items and the edges that connect them.
    ///
    /// Everything is validated before anything is applied, so a failed
    /// append leaves the state untouched. Edges may reference items already
    /// in the graph or items in the same batch. A repeated `(cause, effect)`
    /// pair keeps the first rationale.
    pub fn append(
        &mut self,
        items: Vec<DiagnosticItem>,
        relationships: Vec<CausalRelationship>,
    ) -> Result<(), GraphError> {
        let mut incoming = HashSet::new();
        for item in &items {
            item.validate()?;
            if self.contains(&item.name) || !incoming.insert(item.name.as_str()) {
                return Err(GraphError::DuplicateItem {
                    name: item.name.clone(),
                });
            }
        }
        for rel in &relationships {
            self.check_relationship(rel, |name| incoming.contains(name))?;
        }

        for item in items {
            self.insert_node(item, None);
        }
        for rel in relationships {
            self.insert_edge(rel)?;
        }
        Ok(())
    }

    /// Swap `old` for `replacements` at the same position in discovery order.
    ///
    /// Edges touching `old` are dropped. Callers re-supply edges for the new
    /// items through [`append`](Self::append). Returns the removed item.
    pub fn replace(
        &mut self,
        old: &str,
        replacements: Vec<DiagnosticItem>,
    ) -> Result<DiagnosticItem, GraphError> {
        let idx = self.node(old)?;
        let mut incoming = HashSet::new();
        for item in &replacements {
            item.validate()?;
            let clashes = item.name != old && self.contains(&item.name);
            if clashes || !incoming.insert(item.name.as_str()) {
                return Err(GraphError::DuplicateItem {
                    name: item.name.clone(),
                });
            }
        }

        let position = self.order.iter().position(|&n| n == idx);
        let removed = self
            .graph
            .remove_node(idx)
            .ok_or_else(|| GraphError::ItemNotFound {
                name: old.to_string(),
            })?;
        self.index.remove(old);
        self.order.retain(|&n| n != idx);

        let mut at = position.unwrap_or(self.order.len());
        for item in replacements {
            self.insert_node(item, Some(at));
            at += 1;
        }
        tracing::debug!(item = %old, "replaced item");
        Ok(removed)
    }

    /// Rename an item. Edges follow the node, so every relationship that
    /// mentioned `old` (as cause or effect) now mentions `new`.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), GraphError> {
        let idx = self.node(old)?;
        if old == new {
            return Ok(());
        }
        if new.trim().is_empty() {
            return Err(GraphError::InvalidTransition {
                name: old.to_string(),
                reason: "item name must not be empty".to_string(),
            });
        }
        if self.contains(new) {
            return Err(GraphError::DuplicateItem {
                name: new.to_string(),
            });
        }
        if let Some(item) = self.graph.node_weight_mut(idx) {
            item.name = new.to_string();
        }
        self.index.remove(old);
        self.index.insert(new.to_string(), idx);
        tracing::debug!(from = %old, to = %new, "renamed item");
        Ok(())
    }

    /// Mark an item fixed. Returns `true` if it was not fixed before.
    pub fn mark_fixed(&mut self, name: &str) -> Result<bool, GraphError> {
        let item = self.item_mut(name)?;
        Ok(item.mark_fixed())
    }

    pub fn set_root_cause_flag(&mut self, name: &str, flag: bool) -> Result<(), GraphError> {
        self.item_mut(name)?.set_root_cause_flag(flag)
    }

    pub fn set_analysis(&mut self, name: &str, analysis: impl Into<String>) -> Result<(), GraphError> {
        self.item_mut(name)?.analysis = Some(analysis.into());
        Ok(())
    }

    /// Apply the outcome of verifying a suspect.
    ///
    /// Resolves the severity, takes over the populated text fields and basis,
    /// and renames the item when the verified name differs. Returns the name
    /// the item carries afterwards. Nothing changes if any step fails.
    pub fn apply_verification(
        &mut self,
        name: &str,
        verified: DiagnosticItem,
    ) -> Result<String, GraphError> {
        let mut updated = self.item(name)?.clone();
        updated.resolve_severity(verified.severity())?;
        updated.product = verified.product;
        if verified.symptom.is_some() {
            updated.symptom = verified.symptom;
        }
        if verified.analysis.is_some() {
            updated.analysis = verified.analysis;
        }
        if verified.suggested_fix.is_some() {
            updated.suggested_fix = verified.suggested_fix;
        }
        if verified.diagnostic_basis.is_some() {
            updated.diagnostic_basis = verified.diagnostic_basis;
        }

        let new_name = verified.name.trim();
        let final_name = if new_name.is_empty() { name } else { new_name }.to_string();
        self.rename(name, &final_name)?;
        updated.name = final_name.clone();
        *self.item_mut(&final_name)? = updated;
        Ok(final_name)
    }

    pub(crate) fn node(&self, name: &str) -> Result<NodeIndex, GraphError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::ItemNotFound {
                name: name.to_string(),
            })
    }

    pub(crate) fn to_relationship(
        &self,
        source: NodeIndex,
        target: NodeIndex,
        edge: &CausalEdge,
    ) -> CausalRelationship {
        let name_of = |idx| {
            self.graph
                .node_weight(idx)
                .map(|item: &DiagnosticItem| item.name.clone())
                .unwrap_or_default()
        };
        CausalRelationship::new(name_of(source), name_of(target), edge.description.clone())
    }

    fn item_mut(&mut self, name: &str) -> Result<&mut DiagnosticItem, GraphError> {
        let idx = self.node(name)?;
        self.graph
            .node_weight_mut(idx)
            .ok_or_else(|| GraphError::ItemNotFound {
                name: name.to_string(),
            })
    }

    fn check_relationship(
        &self,
        rel: &CausalRelationship,
        pending: impl Fn(&str) -> bool,
    ) -> Result<(), GraphError> {
        if rel.cause == rel.effect {
            return Err(GraphError::InvalidRelationship {
                cause: rel.cause.clone(),
                effect: rel.effect.clone(),
                reason: "an item cannot cause itself".to_string(),
            });
        }
        for name in [&rel.cause, &rel.effect] {
            if !self.contains(name) && !pending(name) {
                return Err(GraphError::ItemNotFound { name: name.clone() });
            }
        }
        Ok(())
    }

    fn insert_node(&mut self, item: DiagnosticItem, at: Option<usize>) {
        let name = item.name.clone();
        let idx = self.graph.add_node(item);
        self.index.insert(name, idx);
        match at {
            Some(pos) if pos <= self.order.len() => self.order.insert(pos, idx),
            _ => self.order.push(idx),
        }
    }

    fn insert_edge(&mut self, rel: CausalRelationship) -> Result<(), GraphError> {
        let cause = self.node(&rel.cause)?;
        let effect = self.node(&rel.effect)?;
        if self.graph.find_edge(cause, effect).is_some() {
            tracing::debug!(cause = %rel.cause, effect = %rel.effect, "dropping repeated relationship");
            return Ok(());
        }
        let seq = self.next_edge_seq;
        self.next_edge_seq += 1;
        self.graph
            .add_edge(cause, effect, CausalEdge::new(rel.description, seq));
        Ok(())
    }
}
