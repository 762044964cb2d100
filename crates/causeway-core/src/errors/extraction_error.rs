/// Errors while building the initial graph from rule-based checks.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("rule report not found: {path}")]
    ReportNotFound { path: String },

    #[error("invalid rule report: {reason}")]
    InvalidReport { reason: String },

    #[error("invalid product id: {id}")]
    InvalidProduct { id: i64 },

    #[error("invalid severity: {value}")]
    InvalidSeverity { value: String },
}
