use serde::{Deserialize, Serialize};

use causeway_core::errors::CausewayResult;
use causeway_core::models::{DiagnosticItem, TokenUsage};
use causeway_graph::DiagnosticState;

/// The item chosen to work on next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub name: String,
    /// The item can be remediated without further decomposition.
    pub directly_actionable: bool,
    #[serde(default)]
    pub usage: TokenUsage,
}

/// A proposed cause of the expanded anomaly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspectProposal {
    pub item: DiagnosticItem,
    /// Why this suspect could produce the anomaly. Becomes the edge rationale.
    pub rationale: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expansion {
    /// Refined analysis of the anomaly itself.
    #[serde(default)]
    pub analysis: Option<String>,
    /// In the oracle's priority order.
    pub suspects: Vec<SuspectProposal>,
    #[serde(default)]
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    /// The suspect as verified. The name may differ from the one asked about.
    pub item: DiagnosticItem,
    #[serde(default)]
    pub usage: TokenUsage,
}

impl Verification {
    pub fn is_abnormal(&self) -> bool {
        self.item.is_abnormal()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mitigation {
    #[serde(default)]
    pub remediation: Option<String>,
    /// An independent check confirmed the fix.
    pub confirmed: bool,
    #[serde(default)]
    pub usage: TokenUsage,
}

/// Judgement calls the search engine delegates.
///
/// Implementations read the graph but never mutate it; the engine applies
/// whatever they return. Results may be non-deterministic, but an
/// implementation backed by recorded artifacts must return the same
/// structural result on every re-run.
pub trait DecisionOracle: Send {
    /// Called once before the first decision of a run.
    fn begin_run(&mut self, _task_id: &str) -> CausewayResult<()> {
        Ok(())
    }

    /// Pick one of `candidates` to work on next.
    fn select(&mut self, graph: &DiagnosticState, candidates: &[String])
        -> CausewayResult<Selection>;

    /// Propose suspects that could have caused `anomaly`.
    fn expand(&mut self, anomaly: &str, graph: &DiagnosticState) -> CausewayResult<Expansion>;

    /// Resolve the severity of a suspect from its single effect edge.
    fn verify(&mut self, suspect: &str, graph: &DiagnosticState) -> CausewayResult<Verification>;

    /// Remediate a confirmed root cause.
    fn mitigate(&mut self, root_cause: &str, graph: &DiagnosticState)
        -> CausewayResult<Mitigation>;

    /// Is `effect` resolved now that `cause` is fixed?
    fn check_mitigation(
        &mut self,
        effect: &str,
        cause: &str,
        graph: &DiagnosticState,
    ) -> CausewayResult<bool>;
}
