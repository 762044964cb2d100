//! The recursive root-cause search of one diagnosis run.

use std::collections::{HashMap, HashSet};

use serde_json::json;

use causeway_core::config::SearchConfig;
use causeway_core::errors::{CausewayResult, OracleError};
use causeway_core::models::{CausalRelationship, HistoryAction, TokenUsage};
use causeway_graph::DiagnosticState;
use causeway_oracle::structured::normalized_key;
use causeway_oracle::{DecisionOracle, Expansion};

use crate::backprop::back_propagate;
use crate::history::HistoryLog;
use crate::tracing_setup::events;

/// What the search found before it stopped.
#[derive(Debug, Default)]
pub(crate) struct SearchOutcome {
    pub root_causes: Vec<String>,
    pub abandoned: Vec<String>,
}

pub(crate) struct Search<'a> {
    task_id: &'a str,
    oracle: &'a mut dyn DecisionOracle,
    limits: &'a SearchConfig,
    state: &'a mut DiagnosticState,
    history: &'a mut HistoryLog,
    /// Benign or abandoned items. Never offered to `select` again.
    closed: HashSet<String>,
    abandoned: Vec<String>,
    expansions: HashMap<String, usize>,
}

impl<'a> Search<'a> {
    pub(crate) fn new(
        task_id: &'a str,
        oracle: &'a mut dyn DecisionOracle,
        limits: &'a SearchConfig,
        state: &'a mut DiagnosticState,
        history: &'a mut HistoryLog,
    ) -> Self {
        Self {
            task_id,
            oracle,
            limits,
            state,
            history,
            closed: HashSet::new(),
            abandoned: Vec::new(),
            expansions: HashMap::new(),
        }
    }

    /// Select and resolve items until the graph is resolved, nothing is left
    /// to offer, or the round limit is reached.
    pub(crate) fn run(mut self) -> CausewayResult<SearchOutcome> {
        let mut root_causes = Vec::new();
        let mut rounds = 0;

        while !self.state.is_resolved() {
            let candidates = self.candidates();
            if candidates.is_empty() {
                events::search_abandoned(self.task_id, None, "no selectable items left");
                break;
            }
            if rounds >= self.limits.max_select_rounds {
                events::search_abandoned(self.task_id, None, "select round limit reached");
                break;
            }
            rounds += 1;

            let (name, directly_actionable) = self.select(&candidates)?;
            root_causes.extend(self.resolve(&name, Some(directly_actionable), 0)?);
        }

        Ok(SearchOutcome {
            root_causes,
            abandoned: self.abandoned,
        })
    }

    /// Unfixed items that are not normal and not closed, in discovery order.
    fn candidates(&self) -> Vec<String> {
        self.state
            .items()
            .filter(|item| !item.is_fixed() && !item.is_normal())
            .filter(|item| !self.closed.contains(&item.name))
            .map(|item| item.name.clone())
            .collect()
    }

    /// Ask the oracle to pick one of `candidates` and record its decision.
    ///
    /// The root-cause flag of a suspect is applied only after verification.
    fn select(&mut self, candidates: &[String]) -> CausewayResult<(String, bool)> {
        let selection = self.oracle.select(self.state, candidates)?;
        let name = selection.name;
        let item = self.state.item(&name)?;
        if !candidates.contains(&name) {
            return Err(OracleError::malformed(
                "select",
                format!("{name} was not among the offered items"),
            )
            .into());
        }
        if !item.is_suspect() {
            self.state
                .set_root_cause_flag(&name, selection.directly_actionable)?;
        }

        self.history.record(
            HistoryAction::Select,
            vec![name.clone()],
            json!({
                "name": name,
                "possible_root_cause": selection.directly_actionable,
                "candidates": candidates,
            }),
            self.state,
            selection.usage,
        )?;
        events::item_selected(self.task_id, &name, selection.directly_actionable);
        Ok((name, selection.directly_actionable))
    }

    /// Resolve one item. Returns the root causes fixed under it.
    ///
    /// `decision` is the root-cause flag chosen when the item was selected;
    /// without one, the oracle is asked once the item is verified.
    fn resolve(
        &mut self,
        name: &str,
        decision: Option<bool>,
        depth: usize,
    ) -> CausewayResult<Vec<String>> {
        let span = crate::resolve_span!(name, depth);
        let _guard = span.enter();

        let mut name = name.to_string();
        if self.state.item(&name)?.is_suspect() {
            match self.verify(&name)? {
                Some(verified) => name = verified,
                None => return Ok(Vec::new()),
            }
        }

        let item = self.state.item(&name)?;
        if item.is_fixed() {
            return Ok(Vec::new());
        }
        if !item.is_abnormal() {
            self.closed.insert(name);
            return Ok(Vec::new());
        }
        if !item.root_cause_flag().is_determined() {
            match decision {
                Some(flag) => self.state.set_root_cause_flag(&name, flag)?,
                None => {
                    self.select(std::slice::from_ref(&name))?;
                }
            }
        }

        if self.state.item(&name)?.is_possible_root_cause()? {
            self.mitigate(&name)?;
            return Ok(vec![name]);
        }
        self.expand(&name, depth)
    }

    /// Verify a suspect against its single effect. Returns the verified name,
    /// or `None` when the suspect turned out benign.
    fn verify(&mut self, name: &str) -> CausewayResult<Option<String>> {
        self.state.sole_effect(name)?;
        let verification = self.oracle.verify(name, self.state)?;
        let abnormal = verification.is_abnormal();
        let severity = verification.item.severity();
        let usage = verification.usage;
        let verified = self.state.apply_verification(name, verification.item)?;

        let items = if verified == name {
            vec![verified.clone()]
        } else {
            vec![name.to_string(), verified.clone()]
        };
        self.history.record(
            HistoryAction::Verify,
            items,
            json!({
                "name": name,
                "verified_name": verified,
                "severity": severity,
                "abnormal": abnormal,
            }),
            self.state,
            usage,
        )?;
        events::item_verified(self.task_id, name, &verified, severity, abnormal);

        if abnormal {
            Ok(Some(verified))
        } else {
            self.closed.insert(verified);
            Ok(None)
        }
    }

    /// Expand an anomaly and resolve its suspects in the order given, until
    /// the anomaly is fixed or the suspects run out.
    fn expand(&mut self, name: &str, depth: usize) -> CausewayResult<Vec<String>> {
        if depth >= self.limits.max_expansion_depth {
            self.abandon(name, "expansion depth limit reached");
            return Ok(Vec::new());
        }
        let count = self.expansions.get(name).copied().unwrap_or(0);
        if count >= self.limits.max_expansions_per_item {
            self.abandon(name, "expansion limit reached for item");
            return Ok(Vec::new());
        }
        self.expansions.insert(name.to_string(), count + 1);

        let expansion = self.oracle.expand(name, self.state)?;
        let suspects = self.apply_expansion(name, expansion, depth)?;
        if suspects.is_empty() {
            self.abandon(name, "expansion proposed no suspects");
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        for suspect in suspects {
            if self.state.is_fixed(name)? {
                break;
            }
            found.extend(self.resolve(&suspect, None, depth + 1)?);
        }
        if !self.state.is_fixed(name)? {
            tracing::debug!(item = %name, "suspects exhausted without fixing the item");
        }
        Ok(found)
    }

    /// Add the proposed suspects with an edge to `anomaly` each. Returns the
    /// suspect names in the oracle's order.
    ///
    /// Suspects matching an item already in the graph (by normalised name)
    /// are re-proposals from an earlier expansion and are dropped.
    fn apply_expansion(
        &mut self,
        anomaly: &str,
        expansion: Expansion,
        depth: usize,
    ) -> CausewayResult<Vec<String>> {
        const OP: &str = "expand";
        let Expansion {
            analysis,
            suspects,
            usage,
        } = expansion;

        let mut items = Vec::with_capacity(suspects.len());
        let mut relationships = Vec::with_capacity(suspects.len());
        let mut proposals = Vec::with_capacity(suspects.len());
        let mut known: HashSet<String> =
            self.state.items().map(|item| normalized_key(&item.name)).collect();
        for proposal in suspects {
            let item = proposal.item;
            if !known.insert(normalized_key(&item.name)) {
                tracing::debug!(anomaly = %anomaly, suspect = %item.name, "dropping re-proposed suspect");
                continue;
            }
            if !item.is_suspect() || item.is_fixed() {
                return Err(OracleError::malformed(
                    OP,
                    format!("suspect {} must be unverified and unfixed", item.name),
                )
                .into());
            }
            proposals.push(json!({
                "name": item.name,
                "product": item.product,
                "rationale": proposal.rationale,
            }));
            relationships.push(CausalRelationship::new(
                item.name.clone(),
                anomaly,
                proposal.rationale,
            ));
            items.push(item);
        }
        let names: Vec<String> = items.iter().map(|item| item.name.clone()).collect();

        if let Some(text) = &analysis {
            self.state.set_analysis(anomaly, text.clone())?;
        }
        self.state.append(items, relationships)?;
        self.history.record(
            HistoryAction::Expand,
            names.clone(),
            json!({
                "anomaly": anomaly,
                "depth": depth,
                "analysis": analysis,
                "suspects": proposals,
            }),
            self.state,
            usage,
        )?;
        events::item_expanded(self.task_id, anomaly, &names, depth);
        Ok(names)
    }

    /// Remediate a root cause. The item is fixed whatever the outcome; only a
    /// confirmed fix is carried downstream.
    fn mitigate(&mut self, name: &str) -> CausewayResult<()> {
        let mitigation = self.oracle.mitigate(name, self.state)?;
        self.state.mark_fixed(name)?;
        self.history.record(
            HistoryAction::Mitigate,
            vec![name.to_string()],
            json!({
                "name": name,
                "remediation": mitigation.remediation,
                "confirmed": mitigation.confirmed,
            }),
            self.state,
            mitigation.usage,
        )?;
        events::item_mitigated(self.task_id, name, mitigation.confirmed);

        if mitigation.confirmed {
            let task_id = self.task_id;
            let history = &mut *self.history;
            back_propagate(&mut *self.state, &mut *self.oracle, name, |state, fix| {
                history.record(
                    HistoryAction::BackPropagate,
                    vec![fix.cause.clone(), fix.effect.clone()],
                    json!({ "cause": fix.cause, "effect": fix.effect }),
                    state,
                    TokenUsage::default(),
                )?;
                events::fix_propagated(task_id, &fix.cause, &fix.effect);
                Ok(())
            })?;
        }
        Ok(())
    }

    fn abandon(&mut self, name: &str, reason: &str) {
        events::search_abandoned(self.task_id, Some(name), reason);
        if self.closed.insert(name.to_string()) {
            self.abandoned.push(name.to_string());
        }
    }
}
