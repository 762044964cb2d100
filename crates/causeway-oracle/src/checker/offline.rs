use causeway_core::errors::CausewayResult;
use causeway_core::traits::{MitigationCheck, MitigationChecker};

/// Confirms every mitigation. Used in offline mode, e.g. when diagnosing from
/// recorded artifacts.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineChecker;

impl MitigationChecker for OfflineChecker {
    fn check(&self, request: &MitigationCheck) -> CausewayResult<bool> {
        tracing::trace!(anomaly = %request.anomaly, "offline check, assuming fixed");
        Ok(true)
    }
}
