//! Serializable per-item views of the graph, shaped for the reasoning service.

use petgraph::Direction;
use serde::{Deserialize, Serialize};

use causeway_core::errors::GraphError;
use causeway_core::models::{DiagnosticBasis, DiagnosticItem, Product, Severity};

use crate::state::DiagnosticState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextOptions {
    pub with_causes: bool,
    pub with_effects: bool,
    pub only_unfixed: bool,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            with_causes: true,
            with_effects: true,
            only_unfixed: false,
        }
    }
}

/// A neighbour of an item and the rationale of the connecting edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedItem {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextEntry {
    pub name: String,
    pub product: Product,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic_basis: Option<DiagnosticBasis>,
    pub fixed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potential_causes: Option<Vec<LinkedItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potential_effects: Option<Vec<LinkedItem>>,
}

impl DiagnosticState {
    /// Context records for every item (or every unfixed item).
    pub fn context_list(&self, options: ContextOptions) -> Vec<ContextEntry> {
        self.items()
            .filter(|item| !options.only_unfixed || !item.is_fixed())
            .filter_map(|item| self.entry(item, options).ok())
            .collect()
    }

    /// Context record for a single item.
    pub fn item_context(
        &self,
        name: &str,
        options: ContextOptions,
    ) -> Result<ContextEntry, GraphError> {
        let item = self.item(name)?;
        self.entry(item, options)
    }

    fn entry(
        &self,
        item: &DiagnosticItem,
        options: ContextOptions,
    ) -> Result<ContextEntry, GraphError> {
        let potential_causes = if options.with_causes {
            Some(self.linked_items(&item.name, Direction::Incoming)?)
        } else {
            None
        };
        let potential_effects = if options.with_effects {
            Some(self.linked_items(&item.name, Direction::Outgoing)?)
        } else {
            None
        };
        Ok(ContextEntry {
            name: item.name.clone(),
            product: item.product,
            severity: item.severity(),
            symptom: item.symptom.clone(),
            analysis: item.analysis.clone(),
            suggested_fix: item.suggested_fix.clone(),
            diagnostic_basis: item.diagnostic_basis.clone(),
            fixed: item.is_fixed(),
            potential_causes,
            potential_effects,
        })
    }

    fn linked_items(&self, name: &str, dir: Direction) -> Result<Vec<LinkedItem>, GraphError> {
        Ok(self
            .linked(name, dir)?
            .into_iter()
            .filter_map(|(idx, edge)| {
                self.graph.node_weight(idx).map(|other| LinkedItem {
                    name: other.name.clone(),
                    description: edge.description.clone(),
                })
            })
            .collect())
    }
}
