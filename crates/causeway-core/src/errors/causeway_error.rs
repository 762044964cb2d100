use super::{ExtractionError, GraphError, OracleError};

/// Top-level error type for the Causeway diagnosis system.
/// All subsystem errors convert into this via `From` impls.
///
/// Every variant is fatal for the diagnosis run that produced it: the engine
/// never attempts partial recovery on a graph it can no longer trust.
#[derive(Debug, thiserror::Error)]
pub enum CausewayError {
    #[error("graph precondition violated: {0}")]
    Graph(#[from] GraphError),

    #[error("oracle contract violated: {0}")]
    Oracle(#[from] OracleError),

    #[error("initial extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    ConfigError(String),
}

impl CausewayError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Malformed graph: missing or duplicate names, wrong effect count.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Graph(_))
    }

    /// The oracle returned something the engine cannot apply.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Oracle(e) if !e.is_transient())
    }

    /// The oracle (or its confirmation service) could not be reached.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Oracle(e) if e.is_transient())
    }
}

/// Convenience type alias.
pub type CausewayResult<T> = Result<T, CausewayError>;
