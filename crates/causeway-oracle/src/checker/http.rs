//! Confirmation service client with retry, exponential backoff and timeout.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use causeway_core::config::OracleConfig;
use causeway_core::errors::{CausewayError, CausewayResult, OracleError};
use causeway_core::traits::{MitigationCheck, MitigationChecker};

/// Configuration for the HTTP confirmation client.
#[derive(Debug, Clone)]
pub struct HttpCheckerConfig {
    /// Endpoint receiving the check payload.
    pub url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum number of retry attempts.
    pub max_retries: u32,
    /// Initial backoff duration (doubles each retry).
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
}

impl Default for HttpCheckerConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
        }
    }
}

/// Reply of the confirmation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    pub is_fixed: bool,
}

fn unavailable(reason: String) -> CausewayError {
    OracleError::Unavailable { reason }.into()
}

/// POSTs `{task_id, anomaly, cause, suggests}` and reads `{is_fixed}`.
/// Requires the `online` feature; without it every check fails as unavailable.
#[derive(Debug)]
pub struct HttpChecker {
    config: HttpCheckerConfig,
}

impl HttpChecker {
    pub fn new(config: HttpCheckerConfig) -> Self {
        Self { config }
    }

    pub fn from_config(oracle: &OracleConfig) -> CausewayResult<Self> {
        let url = oracle.check_url.clone().ok_or_else(|| {
            CausewayError::ConfigError("oracle.check_url is required for online checks".into())
        })?;
        Ok(Self::new(HttpCheckerConfig {
            url,
            timeout: Duration::from_secs(oracle.timeout_secs),
            max_retries: oracle.max_retries,
            ..HttpCheckerConfig::default()
        }))
    }

    pub fn config(&self) -> &HttpCheckerConfig {
        &self.config
    }

    /// Retry loop. Client errors are not retried.
    #[cfg(feature = "online")]
    fn post(&self, payload: &MitigationCheck) -> CausewayResult<CheckResponse> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout)
            .gzip(true)
            .build()
            .map_err(|e: reqwest::Error| unavailable(e.to_string()))?;

        let mut backoff = self.config.initial_backoff;
        let mut last_err = String::new();

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tracing::debug!(
                    "check: retry attempt {}/{} after {:?}",
                    attempt,
                    self.config.max_retries,
                    backoff
                );
                std::thread::sleep(backoff);
                backoff = (backoff * 2).min(self.config.max_backoff);
            }

            match client.post(&self.config.url).json(payload).send() {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return resp.json::<CheckResponse>().map_err(|e: reqwest::Error| {
                            unavailable(format!("deserialization failed: {e}"))
                        });
                    }
                    if status.is_client_error() {
                        let body_text = resp.text().unwrap_or_default();
                        return Err(unavailable(format!("HTTP {status}: {body_text}")));
                    }
                    last_err = format!("HTTP {status}");
                }
                Err(e) => {
                    last_err = e.to_string();
                }
            }
        }

        Err(unavailable(format!(
            "all {} retries exhausted: {last_err}",
            self.config.max_retries
        )))
    }

    #[cfg(not(feature = "online"))]
    fn post(&self, _payload: &MitigationCheck) -> CausewayResult<CheckResponse> {
        Err(unavailable(format!(
            "online feature not enabled, cannot reach {}",
            self.config.url
        )))
    }
}

impl MitigationChecker for HttpChecker {
    fn check(&self, request: &MitigationCheck) -> CausewayResult<bool> {
        let response = self.post(request)?;
        tracing::debug!(
            anomaly = %request.anomaly,
            is_fixed = response.is_fixed,
            "mitigation check answered"
        );
        Ok(response.is_fixed)
    }
}
