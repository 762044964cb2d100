use serde::{Deserialize, Serialize};

use crate::errors::CausewayResult;

/// Payload sent to the confirmation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationCheck {
    pub task_id: String,
    /// The anomaly whose resolution is being checked.
    pub anomaly: String,
    /// The upstream cause that was fixed, when checking a downstream effect.
    pub cause: Option<String>,
    /// Remediation text, when checking a fresh mitigation.
    pub suggests: Option<String>,
}

/// Independent confirmation that a remediation resolved an anomaly.
pub trait MitigationChecker: Send {
    fn check(&self, request: &MitigationCheck) -> CausewayResult<bool>;
}
