//! Deterministic oracle that plays back pre-recorded decisions.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use causeway_core::errors::{CausewayResult, OracleError};
use causeway_graph::DiagnosticState;

use crate::oracle::{DecisionOracle, Expansion, Mitigation, Selection, Verification};

/// Recorded decisions for one diagnosis run.
///
/// Selections are consumed in order. Expansions are keyed by anomaly name and
/// consumed in order per anomaly. Verifications and mitigations are keyed by
/// the name the engine asks about. Checks not listed fall back to
/// `default_check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub selections: Vec<Selection>,
    #[serde(default)]
    pub expansions: HashMap<String, Vec<Expansion>>,
    #[serde(default)]
    pub verifications: HashMap<String, Verification>,
    #[serde(default)]
    pub mitigations: HashMap<String, Mitigation>,
    #[serde(default)]
    pub checks: Vec<ScriptedCheck>,
    #[serde(default = "default_check")]
    pub default_check: bool,
}

impl Default for ReplayScript {
    fn default() -> Self {
        Self {
            selections: Vec::new(),
            expansions: HashMap::new(),
            verifications: HashMap::new(),
            mitigations: HashMap::new(),
            checks: Vec::new(),
            default_check: default_check(),
        }
    }
}

fn default_check() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedCheck {
    pub effect: String,
    pub cause: String,
    pub fixed: bool,
}

pub struct ReplayOracle {
    selections: VecDeque<Selection>,
    expansions: HashMap<String, VecDeque<Expansion>>,
    verifications: HashMap<String, Verification>,
    mitigations: HashMap<String, Mitigation>,
    checks: Vec<ScriptedCheck>,
    default_check: bool,
    calls: Vec<String>,
}

impl ReplayOracle {
    pub fn new(script: ReplayScript) -> Self {
        Self {
            selections: script.selections.into(),
            expansions: script
                .expansions
                .into_iter()
                .map(|(name, list)| (name, list.into()))
                .collect(),
            verifications: script.verifications,
            mitigations: script.mitigations,
            checks: script.checks,
            default_check: script.default_check,
            calls: Vec::new(),
        }
    }

    /// Every call made so far, as `operation:item` strings.
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    /// Selections not consumed yet.
    pub fn remaining_selections(&self) -> usize {
        self.selections.len()
    }

    fn record(&mut self, operation: &str, item: &str) {
        self.calls.push(format!("{operation}:{item}"));
    }
}

fn no_recording(operation: &str, key: impl Into<String>) -> OracleError {
    OracleError::NoRecording {
        operation: operation.to_string(),
        key: key.into(),
    }
}

impl DecisionOracle for ReplayOracle {
    fn select(
        &mut self,
        _graph: &DiagnosticState,
        candidates: &[String],
    ) -> CausewayResult<Selection> {
        let selection = self
            .selections
            .pop_front()
            .ok_or_else(|| no_recording("select", candidates.join(", ")))?;
        self.record("select", &selection.name);
        Ok(selection)
    }

    fn expand(&mut self, anomaly: &str, _graph: &DiagnosticState) -> CausewayResult<Expansion> {
        self.record("expand", anomaly);
        let expansion = self
            .expansions
            .get_mut(anomaly)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| no_recording("expand", anomaly))?;
        Ok(expansion)
    }

    fn verify(&mut self, suspect: &str, _graph: &DiagnosticState) -> CausewayResult<Verification> {
        self.record("verify", suspect);
        let verification = self
            .verifications
            .get(suspect)
            .cloned()
            .ok_or_else(|| no_recording("verify", suspect))?;
        Ok(verification)
    }

    fn mitigate(&mut self, root_cause: &str, _graph: &DiagnosticState) -> CausewayResult<Mitigation> {
        self.record("mitigate", root_cause);
        let mitigation = self
            .mitigations
            .get(root_cause)
            .cloned()
            .ok_or_else(|| no_recording("mitigate", root_cause))?;
        Ok(mitigation)
    }

    fn check_mitigation(
        &mut self,
        effect: &str,
        cause: &str,
        _graph: &DiagnosticState,
    ) -> CausewayResult<bool> {
        self.record("check", &format!("{effect}<-{cause}"));
        Ok(self
            .checks
            .iter()
            .find(|c| c.effect == effect && c.cause == cause)
            .map(|c| c.fixed)
            .unwrap_or(self.default_check))
    }
}
