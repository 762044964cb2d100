//! Carrying a fix from a cause to the effects it produced.

use serde::{Deserialize, Serialize};

use causeway_core::errors::CausewayResult;
use causeway_graph::DiagnosticState;
use causeway_oracle::DecisionOracle;

/// A downstream effect marked fixed because `cause` was fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropagatedFix {
    pub cause: String,
    pub effect: String,
}

/// Walk the effects of the fixed item `cause`, depth first in edge order.
///
/// Each unfixed effect is checked with the oracle; a confirmed effect is
/// marked fixed, reported to `on_fix` and walked in turn. Fixed effects are
/// skipped, so cycles terminate and every item is fixed at most once.
pub fn back_propagate<F>(
    state: &mut DiagnosticState,
    oracle: &mut dyn DecisionOracle,
    cause: &str,
    mut on_fix: F,
) -> CausewayResult<Vec<PropagatedFix>>
where
    F: FnMut(&DiagnosticState, &PropagatedFix) -> CausewayResult<()>,
{
    let mut fixes = Vec::new();
    propagate(state, oracle, cause, &mut on_fix, &mut fixes)?;
    Ok(fixes)
}

fn propagate<F>(
    state: &mut DiagnosticState,
    oracle: &mut dyn DecisionOracle,
    cause: &str,
    on_fix: &mut F,
    fixes: &mut Vec<PropagatedFix>,
) -> CausewayResult<()>
where
    F: FnMut(&DiagnosticState, &PropagatedFix) -> CausewayResult<()>,
{
    let effects: Vec<String> = state
        .effects_of(cause)?
        .into_iter()
        .map(|item| item.name.clone())
        .collect();

    for effect in effects {
        if state.is_fixed(&effect)? {
            continue;
        }
        if !oracle.check_mitigation(&effect, cause, state)? {
            tracing::debug!(cause = %cause, effect = %effect, "fix not confirmed downstream");
            continue;
        }
        if !state.mark_fixed(&effect)? {
            continue;
        }
        let fix = PropagatedFix {
            cause: cause.to_string(),
            effect,
        };
        on_fix(state, &fix)?;
        let next = fix.effect.clone();
        fixes.push(fix);
        propagate(state, oracle, &next, on_fix, fixes)?;
    }
    Ok(())
}
