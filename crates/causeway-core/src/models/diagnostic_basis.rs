use serde::{Deserialize, Serialize};

/// Evidence kind behind a confirmed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasisKind {
    Rule,
    Log,
    Code,
    #[serde(alias = "mix")]
    Mixed,
}

impl BasisKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rule => "rule",
            Self::Log => "log",
            Self::Code => "code",
            Self::Mixed => "mixed",
        }
    }

    /// Anything that is not rule, log or code counts as mixed evidence.
    pub fn parse_lenient(kind: &str) -> Self {
        match kind.trim().to_ascii_lowercase().as_str() {
            "rule" => Self::Rule,
            "log" => Self::Log,
            "code" => Self::Code,
            _ => Self::Mixed,
        }
    }
}

/// How an item was confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticBasis {
    pub kind: BasisKind,
    /// Finer classification, e.g. `metric-based` for rules.
    #[serde(default)]
    pub subtype: Option<String>,
    /// Name of the rule, log source or code location.
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl DiagnosticBasis {
    pub fn new(kind: BasisKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            subtype: None,
            name: name.into(),
            description: None,
        }
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Subtype for a rule, derived from the id of the rule group it came from.
    pub fn rule_subtype_for_group(group_id: &str) -> &'static str {
        if group_id.starts_with("metric") {
            "metric-based"
        } else if group_id.starts_with("resource") {
            "resource-based"
        } else {
            "log-based"
        }
    }
}
