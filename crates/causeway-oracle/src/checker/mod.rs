pub mod http;
pub mod offline;

pub use http::{HttpChecker, HttpCheckerConfig};
pub use offline::OfflineChecker;

use causeway_core::config::OracleConfig;
use causeway_core::errors::CausewayResult;
use causeway_core::traits::MitigationChecker;

/// The checker the oracle config asks for: always-confirm offline, HTTP otherwise.
pub fn checker_from_config(config: &OracleConfig) -> CausewayResult<Box<dyn MitigationChecker>> {
    if config.offline {
        Ok(Box::new(OfflineChecker))
    } else {
        Ok(Box::new(HttpChecker::from_config(config)?))
    }
}
