use serde::{Deserialize, Serialize};

/// A directed edge: the anomaly in `cause` could produce the one in `effect`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CausalRelationship {
    pub cause: String,
    pub effect: String,
    #[serde(default)]
    pub description: String,
}

impl CausalRelationship {
    pub fn new(
        cause: impl Into<String>,
        effect: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            cause: cause.into(),
            effect: effect.into(),
            description: description.into(),
        }
    }

    /// Ordered `(cause, effect)` pair used for de-duplication.
    pub fn key(&self) -> (&str, &str) {
        (&self.cause, &self.effect)
    }
}
