/// Errors raised when talking to the decision oracle or its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("{operation}: returned unknown item {name}")]
    UnknownItem { operation: String, name: String },

    #[error("{operation}: missing required field `{field}`")]
    MissingField { operation: String, field: String },

    #[error("{operation}: malformed result: {reason}")]
    Malformed { operation: String, reason: String },

    #[error("no module registered for product {product}")]
    ModuleNotFound { product: String },

    #[error("no recorded result for {operation} on {key}")]
    NoRecording { operation: String, key: String },

    #[error("oracle unavailable: {reason}")]
    Unavailable { reason: String },
}

impl OracleError {
    pub fn malformed(operation: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }

    pub fn missing(operation: &str, field: &str) -> Self {
        Self::MissingField {
            operation: operation.to_string(),
            field: field.to_string(),
        }
    }

    /// Whether a retry later could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
