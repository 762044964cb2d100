use causeway_core::models::{BasisKind, DiagnosticItem, Product, Severity};

use crate::state::DiagnosticState;

/// Criteria for a filtered view of the graph. Unset criteria match anything.
///
/// Basis criteria never match items that have no diagnostic basis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    pub products: Option<Vec<Product>>,
    pub severities: Option<Vec<Severity>>,
    pub basis_kinds: Option<Vec<BasisKind>>,
    pub basis_subtypes: Option<Vec<String>>,
}

impl ItemFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(mut self, products: impl IntoIterator<Item = Product>) -> Self {
        self.products = Some(products.into_iter().collect());
        self
    }

    pub fn severities(mut self, severities: impl IntoIterator<Item = Severity>) -> Self {
        self.severities = Some(severities.into_iter().collect());
        self
    }

    pub fn basis_kinds(mut self, kinds: impl IntoIterator<Item = BasisKind>) -> Self {
        self.basis_kinds = Some(kinds.into_iter().collect());
        self
    }

    pub fn basis_subtypes<S: Into<String>>(mut self, subtypes: impl IntoIterator<Item = S>) -> Self {
        self.basis_subtypes = Some(subtypes.into_iter().map(Into::into).collect());
        self
    }

    pub fn matches(&self, item: &DiagnosticItem) -> bool {
        if let Some(products) = &self.products {
            if !products.contains(&item.product) {
                return false;
            }
        }
        if let Some(severities) = &self.severities {
            if !severities.contains(&item.severity()) {
                return false;
            }
        }
        if let Some(kinds) = &self.basis_kinds {
            match &item.diagnostic_basis {
                Some(basis) if kinds.contains(&basis.kind) => {}
                _ => return false,
            }
        }
        if let Some(subtypes) = &self.basis_subtypes {
            let subtype = item
                .diagnostic_basis
                .as_ref()
                .and_then(|basis| basis.subtype.as_ref());
            match subtype {
                Some(s) if subtypes.contains(s) => {}
                _ => return false,
            }
        }
        true
    }
}

impl DiagnosticState {
    /// Items matching `filter`, in discovery order.
    pub fn filter(&self, filter: &ItemFilter) -> Vec<&DiagnosticItem> {
        self.items().filter(|item| filter.matches(item)).collect()
    }
}
