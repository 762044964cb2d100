//! JSON shapes exchanged with the reasoning service, and their strict parsing.
//!
//! Fields are optional at the serde level so that a missing field becomes an
//! [`OracleError::MissingField`] naming it, rather than a generic parse error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use causeway_core::errors::OracleError;
use causeway_core::models::{BasisKind, DiagnosticBasis, Severity};

pub(crate) fn parse<T: DeserializeOwned>(operation: &str, content: Value) -> Result<T, OracleError> {
    if !content.is_object() {
        return Err(OracleError::malformed(operation, "expected a JSON object"));
    }
    serde_json::from_value(content).map_err(|e| OracleError::malformed(operation, e.to_string()))
}

pub(crate) fn required<T>(operation: &str, field: &str, value: Option<T>) -> Result<T, OracleError> {
    value.ok_or_else(|| OracleError::missing(operation, field))
}

/// Required non-blank string.
pub(crate) fn required_text(
    operation: &str,
    field: &str,
    value: Option<String>,
) -> Result<String, OracleError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        _ => Err(OracleError::missing(operation, field)),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectReply {
    pub name: Option<String>,
    pub need_verify: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpandReply {
    #[serde(default)]
    pub analysis: Option<String>,
    pub nodes: Option<Vec<ExpandNode>>,
    #[serde(default)]
    pub edges: Vec<ExpandEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpandNode {
    pub name: Option<String>,
    pub product: Option<String>,
    #[serde(default, alias = "expert_analysis")]
    pub analysis: Option<String>,
    #[serde(default, alias = "expert_suggests")]
    pub suggested_fix: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpandEdge {
    pub cause: Option<String>,
    pub effect: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyReply {
    pub name: Option<String>,
    #[serde(default)]
    pub symptom: Option<String>,
    pub severity: Option<Value>,
    #[serde(default, alias = "expert_analysis")]
    pub analysis: Option<String>,
    #[serde(default, alias = "expert_suggests")]
    pub suggested_fix: Option<String>,
    #[serde(default, alias = "diagnostic_criteria")]
    pub diagnostic_basis: Option<BasisReply>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasisReply {
    #[serde(alias = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl BasisReply {
    pub(crate) fn into_basis(self, operation: &str) -> Result<DiagnosticBasis, OracleError> {
        let kind = BasisKind::parse_lenient(&required(operation, "diagnostic_basis.kind", self.kind)?);
        let name = required_text(operation, "diagnostic_basis.name", self.name)?;
        let mut basis = DiagnosticBasis::new(kind, name);
        basis.subtype = self.subtype;
        basis.description = self.description;
        Ok(basis)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MitigateReply {
    pub solution: Option<String>,
}

/// Severity given either by name or by integer status.
pub(crate) fn parse_severity(operation: &str, value: &Value) -> Result<Severity, OracleError> {
    let severity = match value {
        Value::String(name) => Severity::from_name(name),
        Value::Number(n) => n.as_i64().and_then(Severity::from_status),
        _ => None,
    };
    severity.ok_or_else(|| OracleError::malformed(operation, format!("unrecognised severity {value}")))
}
