//! A single anomaly or candidate cause in the diagnostic graph.

use serde::{Deserialize, Serialize};

use super::{DiagnosticBasis, Product, RootCauseFlag, Severity};
use crate::errors::GraphError;

/// One node of the causal graph.
///
/// `severity`, `fixed` and `possible_root_cause` are private so their
/// transitions stay checked: severity leaves `Unknown` only through
/// verification, `fixed` only goes from false to true, and the root-cause
/// flag cannot be set on a suspect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticItem {
    /// Unique within a graph. Change it through the graph, never directly.
    pub name: String,
    #[serde(default)]
    pub product: Product,
    severity: Severity,
    #[serde(default)]
    pub symptom: Option<String>,
    #[serde(default, alias = "expert_analysis")]
    pub analysis: Option<String>,
    #[serde(default, alias = "expert_suggests")]
    pub suggested_fix: Option<String>,
    #[serde(default, alias = "diagnostic_criteria")]
    pub diagnostic_basis: Option<DiagnosticBasis>,
    #[serde(default)]
    fixed: bool,
    #[serde(default)]
    possible_root_cause: RootCauseFlag,
}

impl DiagnosticItem {
    pub fn new(name: impl Into<String>, product: Product, severity: Severity) -> Self {
        Self {
            name: name.into(),
            product,
            severity,
            symptom: None,
            analysis: None,
            suggested_fix: None,
            diagnostic_basis: None,
            fixed: false,
            possible_root_cause: RootCauseFlag::Undetermined,
        }
    }

    /// A freshly proposed cause that still needs verification.
    pub fn suspect(name: impl Into<String>, product: Product) -> Self {
        Self::new(name, product, Severity::Unknown)
    }

    pub fn with_symptom(mut self, symptom: impl Into<String>) -> Self {
        self.symptom = Some(symptom.into());
        self
    }

    pub fn with_analysis(mut self, analysis: impl Into<String>) -> Self {
        self.analysis = Some(analysis.into());
        self
    }

    pub fn with_suggested_fix(mut self, fix: impl Into<String>) -> Self {
        self.suggested_fix = Some(fix.into());
        self
    }

    pub fn with_basis(mut self, basis: DiagnosticBasis) -> Self {
        self.diagnostic_basis = Some(basis);
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn root_cause_flag(&self) -> RootCauseFlag {
        self.possible_root_cause
    }

    pub fn is_suspect(&self) -> bool {
        self.severity.is_unknown()
    }

    pub fn is_normal(&self) -> bool {
        self.severity.is_normal()
    }

    pub fn is_abnormal(&self) -> bool {
        self.severity.is_abnormal()
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Errors while the flag is still undetermined.
    pub fn is_possible_root_cause(&self) -> Result<bool, GraphError> {
        self.possible_root_cause
            .as_bool()
            .ok_or_else(|| GraphError::FlagUndetermined {
                name: self.name.clone(),
            })
    }

    /// Set the fixed flag. Returns `true` if this call changed it.
    pub fn mark_fixed(&mut self) -> bool {
        let changed = !self.fixed;
        self.fixed = true;
        changed
    }

    /// Record whether this item can be remediated directly.
    pub fn set_root_cause_flag(&mut self, possible_root_cause: bool) -> Result<(), GraphError> {
        if self.severity.is_unknown() {
            return Err(GraphError::InvalidTransition {
                name: self.name.clone(),
                reason: "root-cause flag cannot be set before verification".to_string(),
            });
        }
        self.possible_root_cause = RootCauseFlag::from_bool(possible_root_cause);
        Ok(())
    }

    /// Move a suspect to a concrete severity. Only valid once, from `Unknown`.
    pub fn resolve_severity(&mut self, severity: Severity) -> Result<(), GraphError> {
        if !self.severity.is_unknown() {
            return Err(GraphError::InvalidTransition {
                name: self.name.clone(),
                reason: format!("severity already resolved to {}", self.severity),
            });
        }
        if severity.is_unknown() {
            return Err(GraphError::InvalidTransition {
                name: self.name.clone(),
                reason: "verification must resolve to a concrete severity".to_string(),
            });
        }
        self.severity = severity;
        Ok(())
    }

    /// Check the cross-field invariants. Used when items arrive from outside.
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.name.trim().is_empty() {
            return Err(GraphError::InvalidTransition {
                name: self.name.clone(),
                reason: "item name must not be empty".to_string(),
            });
        }
        if self.severity.is_unknown() && self.possible_root_cause.is_determined() {
            return Err(GraphError::InvalidTransition {
                name: self.name.clone(),
                reason: "a suspect cannot carry a determined root-cause flag".to_string(),
            });
        }
        Ok(())
    }
}
