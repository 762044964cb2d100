//! [`DecisionOracle`] over a [`Reasoner`], exchanging JSON.

pub mod merge;
pub mod symptom;
pub mod wire;

use serde_json::json;

use causeway_core::config::defaults;
use causeway_core::errors::{CausewayResult, OracleError};
use causeway_core::models::{DiagnosticItem, Product, TokenUsage};
use causeway_core::traits::{
    MitigationCheck, MitigationChecker, Reasoner, ReasoningReply, ReasoningRequest, ReasoningTask,
};
use causeway_core::CausewayConfig;
use causeway_graph::{ContextOptions, DiagnosticState};

use crate::oracle::{DecisionOracle, Expansion, Mitigation, Selection, SuspectProposal, Verification};
use wire::{required, required_text, ExpandReply, MitigateReply, SelectReply, VerifyReply};

pub use merge::{merge_suspects, normalized_key};
pub use symptom::symptom_analysis;

/// Oracle that asks a reasoning service for every decision and parses the
/// structured replies strictly. Anything missing or unknown in a reply is a
/// contract violation.
pub struct StructuredOracle<R: Reasoner> {
    reasoner: R,
    checker: Box<dyn MitigationChecker>,
    enabled_products: Vec<Product>,
    consistency_samples: usize,
    task_id: String,
}

impl<R: Reasoner> StructuredOracle<R> {
    pub fn new(reasoner: R, checker: Box<dyn MitigationChecker>) -> Self {
        Self {
            reasoner,
            checker,
            enabled_products: defaults::DEFAULT_ENABLED_PRODUCTS.to_vec(),
            consistency_samples: defaults::DEFAULT_CONSISTENCY_SAMPLES,
            task_id: String::new(),
        }
    }

    pub fn from_config(
        reasoner: R,
        checker: Box<dyn MitigationChecker>,
        config: &CausewayConfig,
    ) -> Self {
        Self::new(reasoner, checker)
            .with_consistency_samples(config.search.consistency_samples)
            .with_enabled_products(config.oracle.enabled_products.clone())
    }

    /// Independent expansion samples merged per expansion. At least one.
    pub fn with_consistency_samples(mut self, samples: usize) -> Self {
        self.consistency_samples = samples.max(1);
        self
    }

    /// Products that have a remediation module.
    pub fn with_enabled_products(mut self, products: Vec<Product>) -> Self {
        self.enabled_products = products;
        self
    }

    pub fn reasoner(&self) -> &R {
        &self.reasoner
    }

    pub fn into_reasoner(self) -> R {
        self.reasoner
    }

    fn ensure_module(&self, product: Product) -> Result<(), OracleError> {
        if self.enabled_products.contains(&product) {
            Ok(())
        } else {
            Err(OracleError::ModuleNotFound {
                product: product.to_string(),
            })
        }
    }

    fn ask(&mut self, request: ReasoningRequest) -> CausewayResult<ReasoningReply> {
        tracing::debug!(task = %request.task, sample = request.sample, "asking reasoner");
        self.reasoner.reason(&request)
    }

    /// Parse one expansion sample into proposals, in the order given.
    fn parse_expansion(
        &self,
        anomaly: &str,
        content: serde_json::Value,
    ) -> Result<(Option<String>, Vec<SuspectProposal>), OracleError> {
        const OP: &str = "expand";
        let reply: ExpandReply = wire::parse(OP, content)?;
        let nodes = required(OP, "nodes", reply.nodes)?;

        let mut proposals = Vec::with_capacity(nodes.len());
        for node in nodes {
            let name = required_text(OP, "nodes.name", node.name)?;
            let product = Product::from_name(&required(OP, "nodes.product", node.product)?);
            let mut item = DiagnosticItem::suspect(name, product);
            item.analysis = node.analysis;
            item.suggested_fix = node.suggested_fix;
            proposals.push(SuspectProposal {
                item,
                rationale: String::new(),
            });
        }

        let mut linked = vec![false; proposals.len()];
        for edge in reply.edges {
            let cause = required_text(OP, "edges.cause", edge.cause)?;
            let effect = required_text(OP, "edges.effect", edge.effect)?;
            if effect != anomaly {
                return Err(OracleError::malformed(
                    OP,
                    format!("edge {cause} -> {effect} does not point at {anomaly}"),
                ));
            }
            let position = proposals
                .iter()
                .position(|p| p.item.name == cause)
                .ok_or_else(|| OracleError::UnknownItem {
                    operation: OP.to_string(),
                    name: cause.clone(),
                })?;
            if !linked[position] {
                proposals[position].rationale = edge.description;
                linked[position] = true;
            }
        }
        if let Some(position) = linked.iter().position(|l| !l) {
            return Err(OracleError::malformed(
                OP,
                format!("suspect {} has no edge to {anomaly}", proposals[position].item.name),
            ));
        }
        Ok((reply.analysis, proposals))
    }
}

impl<R: Reasoner> DecisionOracle for StructuredOracle<R> {
    fn begin_run(&mut self, task_id: &str) -> CausewayResult<()> {
        self.task_id = task_id.to_string();
        self.reasoner.begin_task(task_id)
    }

    fn select(
        &mut self,
        graph: &DiagnosticState,
        candidates: &[String],
    ) -> CausewayResult<Selection> {
        const OP: &str = "select";
        let options = ContextOptions {
            with_causes: true,
            with_effects: false,
            only_unfixed: true,
        };
        let items = candidates
            .iter()
            .map(|name| graph.item_context(name, options))
            .collect::<Result<Vec<_>, _>>()?;
        let reply = self.ask(ReasoningRequest::new(
            ReasoningTask::Select,
            json!({ "diagnostic_items": items }),
        ))?;

        let parsed: SelectReply = wire::parse(OP, reply.content)?;
        let name = required_text(OP, "name", parsed.name)?;
        let need_verify = required(OP, "need_verify", parsed.need_verify)?;
        Ok(Selection {
            name,
            directly_actionable: !need_verify,
            usage: reply.usage,
        })
    }

    fn expand(&mut self, anomaly: &str, graph: &DiagnosticState) -> CausewayResult<Expansion> {
        let context = json!({
            "anomaly": graph.item_context(anomaly, ContextOptions::default())?,
            "products": self.enabled_products,
            "samples": self.consistency_samples,
        });

        let mut usage = TokenUsage::default();
        let mut analysis = None;
        let mut samples = Vec::with_capacity(self.consistency_samples);
        for sample in 0..self.consistency_samples {
            let reply = self.ask(
                ReasoningRequest::new(ReasoningTask::Expand, context.clone()).with_sample(sample),
            )?;
            usage += reply.usage;
            let (sample_analysis, proposals) = self.parse_expansion(anomaly, reply.content)?;
            if sample == 0 {
                analysis = sample_analysis.as_deref().and_then(symptom_analysis);
            }
            samples.push(proposals);
        }

        let suspects = merge_suspects(samples);
        tracing::debug!(
            anomaly = %anomaly,
            samples = self.consistency_samples,
            suspects = suspects.len(),
            "merged expansion samples"
        );
        Ok(Expansion {
            analysis,
            suspects,
            usage,
        })
    }

    fn verify(&mut self, suspect: &str, graph: &DiagnosticState) -> CausewayResult<Verification> {
        const OP: &str = "verify";
        let item = graph.item(suspect)?;
        let relationship = graph.sole_effect(suspect)?;
        let context = json!({
            "cause": graph.item_context(suspect, ContextOptions::default())?,
            "effect": graph.item_context(&relationship.effect, ContextOptions::default())?,
            "relationship": relationship,
        });
        let product = item.product;
        let reply = self.ask(ReasoningRequest::new(ReasoningTask::Verify, context))?;

        let parsed: VerifyReply = wire::parse(OP, reply.content)?;
        let name = required_text(OP, "name", parsed.name)?;
        let severity = wire::parse_severity(OP, &required(OP, "severity", parsed.severity)?)?;
        if severity.is_unknown() {
            return Err(OracleError::malformed(OP, "severity must be resolved").into());
        }

        let mut verified = DiagnosticItem::new(name, product, severity);
        verified.symptom = parsed.symptom;
        verified.analysis = parsed.analysis;
        verified.suggested_fix = parsed.suggested_fix;
        verified.diagnostic_basis = parsed
            .diagnostic_basis
            .map(|basis| basis.into_basis(OP))
            .transpose()?;
        Ok(Verification {
            item: verified,
            usage: reply.usage,
        })
    }

    fn mitigate(&mut self, root_cause: &str, graph: &DiagnosticState) -> CausewayResult<Mitigation> {
        const OP: &str = "mitigate";
        self.ensure_module(graph.item(root_cause)?.product)?;
        let context = json!({
            "anomaly": graph.item_context(root_cause, ContextOptions::default())?,
        });
        let reply = self.ask(ReasoningRequest::new(ReasoningTask::Mitigate, context))?;
        let parsed: MitigateReply = wire::parse(OP, reply.content)?;
        let solution = required_text(OP, "solution", parsed.solution)?;

        let confirmed = self.checker.check(&MitigationCheck {
            task_id: self.task_id.clone(),
            anomaly: root_cause.to_string(),
            cause: None,
            suggests: Some(solution.clone()),
        })?;
        Ok(Mitigation {
            remediation: Some(solution),
            confirmed,
            usage: reply.usage,
        })
    }

    fn check_mitigation(
        &mut self,
        effect: &str,
        cause: &str,
        graph: &DiagnosticState,
    ) -> CausewayResult<bool> {
        self.ensure_module(graph.item(effect)?.product)?;
        self.checker.check(&MitigationCheck {
            task_id: self.task_id.clone(),
            anomaly: effect.to_string(),
            cause: Some(cause.to_string()),
            suggests: None,
        })
    }
}
