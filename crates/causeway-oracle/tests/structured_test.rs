//! StructuredOracle against a scripted reasoner.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use causeway_core::errors::{CausewayError, CausewayResult, GraphError, OracleError};
use causeway_core::models::{
    BasisKind, CausalRelationship, DiagnosticItem, Product, Severity, TokenUsage,
};
use causeway_core::traits::{
    MitigationCheck, MitigationChecker, Reasoner, ReasoningReply, ReasoningRequest, ReasoningTask,
};
use causeway_graph::DiagnosticState;
use causeway_oracle::{DecisionOracle, OfflineChecker, StructuredOracle};
use test_fixtures::load_fixture_value;

/// Replies in order, recording every request.
#[derive(Default)]
struct ScriptedReasoner {
    replies: VecDeque<Value>,
    requests: Vec<ReasoningRequest>,
}

impl ScriptedReasoner {
    fn new(replies: Vec<Value>) -> Self {
        Self {
            replies: replies.into(),
            requests: Vec::new(),
        }
    }
}

impl Reasoner for ScriptedReasoner {
    fn reason(&mut self, request: &ReasoningRequest) -> CausewayResult<ReasoningReply> {
        self.requests.push(request.clone());
        let content = self.replies.pop_front().ok_or_else(|| OracleError::Unavailable {
            reason: "script exhausted".into(),
        })?;
        Ok(ReasoningReply::new(content).with_usage(TokenUsage::new(10, 5)))
    }
}

#[derive(Clone, Default)]
struct RecordingChecker {
    seen: Arc<Mutex<Vec<MitigationCheck>>>,
    answer: bool,
}

impl MitigationChecker for RecordingChecker {
    fn check(&self, request: &MitigationCheck) -> CausewayResult<bool> {
        self.seen.lock().unwrap().push(request.clone());
        Ok(self.answer)
    }
}

fn make_graph() -> DiagnosticState {
    DiagnosticState::from_parts(
        vec![
            DiagnosticItem::new("executor lost", Product::Spark, Severity::Critical),
            DiagnosticItem::new("stage retry", Product::Spark, Severity::Major),
            DiagnosticItem::suspect("memory pressure", Product::Yarn),
            DiagnosticItem::new("namenode rpc latency", Product::Thive, Severity::Major),
        ],
        vec![
            CausalRelationship::new("executor lost", "stage retry", "lost shuffle output"),
            CausalRelationship::new("memory pressure", "executor lost", "containers killed"),
        ],
    )
    .unwrap()
}

fn oracle(replies: Vec<Value>) -> StructuredOracle<ScriptedReasoner> {
    StructuredOracle::new(ScriptedReasoner::new(replies), Box::new(OfflineChecker))
}

fn candidates(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// select
// =============================================================================

#[test]
fn select_inverts_need_verify() {
    let graph = make_graph();
    let mut oracle = oracle(vec![json!({"name": "stage retry", "need_verify": false})]);
    let selection = oracle
        .select(&graph, &candidates(&["executor lost", "stage retry"]))
        .unwrap();
    assert_eq!(selection.name, "stage retry");
    assert!(selection.directly_actionable);
    assert_eq!(selection.usage.total, 15);

    let request = &oracle.reasoner().requests[0];
    assert_eq!(request.task, ReasoningTask::Select);
    let items = request.context["diagnostic_items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["potential_causes"][0]["name"], "memory pressure");
}

#[test]
fn select_without_need_verify_is_a_contract_violation() {
    let graph = make_graph();
    let mut oracle = oracle(vec![json!({"name": "stage retry"})]);
    let err = oracle
        .select(&graph, &candidates(&["stage retry"]))
        .unwrap_err();
    assert!(err.is_contract_violation());
    assert!(matches!(
        err,
        CausewayError::Oracle(OracleError::MissingField { ref field, .. }) if field == "need_verify"
    ));
}

#[test]
fn non_object_reply_is_malformed() {
    let graph = make_graph();
    let mut oracle = oracle(vec![json!("stage retry")]);
    let err = oracle
        .select(&graph, &candidates(&["stage retry"]))
        .unwrap_err();
    assert!(matches!(err, CausewayError::Oracle(OracleError::Malformed { .. })));
}

// =============================================================================
// expand
// =============================================================================

#[test]
fn expand_merges_consistency_samples() {
    let fixture = load_fixture_value("golden/oracle/expand_samples.json");
    let samples = fixture["samples"].as_array().unwrap().clone();
    let graph = make_graph();
    let mut oracle = oracle(samples).with_consistency_samples(3);

    let expansion = oracle.expand("executor lost", &graph).unwrap();
    let names: Vec<_> = expansion.suspects.iter().map(|s| s.item.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Container killed by YARN for exceeding memory limits",
            "Long GC pauses",
            "DataNode decommissioning",
        ]
    );
    assert!(expansion.suspects.iter().all(|s| s.item.is_suspect()));
    assert_eq!(expansion.suspects[0].item.product, Product::Yarn);
    assert_eq!(
        expansion.suspects[0].item.suggested_fix.as_deref(),
        Some("raise spark.executor.memoryOverhead")
    );
    assert_eq!(
        expansion.suspects[1].rationale,
        "heartbeats are missed during stop-the-world pauses"
    );
    assert_eq!(
        expansion.analysis.as_deref(),
        Some("### Symptom Analysis\nExecutors on three hosts stopped heartbeating within 40s of each other.")
    );
    assert_eq!(expansion.usage.total, 45);

    let requests = &oracle.reasoner().requests;
    assert_eq!(
        requests.iter().map(|r| r.sample).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[test]
fn expand_without_symptom_section_leaves_analysis_unset() {
    let graph = make_graph();
    let mut oracle = oracle(vec![json!({
        "analysis": "Executors vanish; no headings in this reply.",
        "nodes": [{"name": "disk full", "product": "hdfs"}],
        "edges": [{"cause": "disk full", "effect": "executor lost", "description": "shuffle spill fails"}]
    })])
    .with_consistency_samples(1);
    let expansion = oracle.expand("executor lost", &graph).unwrap();
    assert_eq!(expansion.suspects.len(), 1);
    assert_eq!(expansion.analysis, None);
}

#[test]
fn expand_suspect_without_edge_is_malformed() {
    let graph = make_graph();
    let mut oracle = oracle(vec![json!({
        "analysis": "x",
        "nodes": [{"name": "disk full", "product": "hdfs"}],
        "edges": []
    })])
    .with_consistency_samples(1);
    let err = oracle.expand("executor lost", &graph).unwrap_err();
    assert!(matches!(err, CausewayError::Oracle(OracleError::Malformed { .. })));
}

#[test]
fn expand_edge_from_unlisted_node_is_unknown_item() {
    let graph = make_graph();
    let mut oracle = oracle(vec![json!({
        "nodes": [{"name": "disk full", "product": "hdfs"}],
        "edges": [
            {"cause": "disk full", "effect": "executor lost", "description": "a"},
            {"cause": "ghost", "effect": "executor lost", "description": "b"}
        ]
    })])
    .with_consistency_samples(1);
    let err = oracle.expand("executor lost", &graph).unwrap_err();
    assert!(matches!(
        err,
        CausewayError::Oracle(OracleError::UnknownItem { ref name, .. }) if name == "ghost"
    ));
}

#[test]
fn expand_of_missing_item_is_a_precondition_error() {
    let graph = make_graph();
    let mut oracle = oracle(vec![]);
    let err = oracle.expand("nope", &graph).unwrap_err();
    assert!(err.is_precondition());
}

// =============================================================================
// verify
// =============================================================================

#[test]
fn verify_accepts_legacy_field_names() {
    let graph = make_graph();
    let mut oracle = oracle(vec![json!({
        "name": "executor memory overhead too small",
        "symptom": "container used 4.2GB of 4GB",
        "severity": 2,
        "expert_analysis": "overhead defaults to 10%",
        "expert_suggests": "set memoryOverhead to 1g",
        "diagnostic_criteria": {
            "type": "log",
            "name": "nodemanager log",
            "description": "Container killed on request. Exit code is 143"
        }
    })]);
    let verification = oracle.verify("memory pressure", &graph).unwrap();
    assert!(verification.is_abnormal());
    let item = verification.item;
    assert_eq!(item.name, "executor memory overhead too small");
    assert_eq!(item.severity(), Severity::Major);
    assert_eq!(item.product, Product::Yarn);
    assert_eq!(item.suggested_fix.as_deref(), Some("set memoryOverhead to 1g"));
    let basis = item.diagnostic_basis.unwrap();
    assert_eq!(basis.kind, BasisKind::Log);

    let context = &oracle.reasoner().requests[0].context;
    assert_eq!(context["effect"]["name"], "executor lost");
    assert_eq!(context["relationship"]["description"], "containers killed");
}

#[test]
fn verify_normal_result_is_not_abnormal() {
    let graph = make_graph();
    let mut oracle = oracle(vec![json!({"name": "memory pressure", "severity": "normal"})]);
    let verification = oracle.verify("memory pressure", &graph).unwrap();
    assert!(!verification.is_abnormal());
}

#[test]
fn verify_must_resolve_severity() {
    let graph = make_graph();
    for severity in [json!("unknown"), json!("fatal"), json!(-1)] {
        let mut oracle = oracle(vec![json!({"name": "memory pressure", "severity": severity.clone()})]);
        let err = oracle.verify("memory pressure", &graph).unwrap_err();
        assert!(err.is_contract_violation(), "{severity} should be rejected");
    }
}

#[test]
fn verify_requires_exactly_one_effect() {
    let mut graph = make_graph();
    graph
        .append(
            vec![],
            vec![CausalRelationship::new("memory pressure", "stage retry", "also")],
        )
        .unwrap();
    let mut oracle = oracle(vec![]);
    let err = oracle.verify("memory pressure", &graph).unwrap_err();
    assert!(matches!(
        err,
        CausewayError::Graph(GraphError::EffectCountMismatch { found: 2, .. })
    ));
    assert!(oracle.reasoner().requests.is_empty());
}

// =============================================================================
// mitigate and check_mitigation
// =============================================================================

#[test]
fn mitigate_sends_solution_to_checker() {
    let graph = make_graph();
    let checker = RecordingChecker {
        answer: false,
        ..Default::default()
    };
    let seen = checker.seen.clone();
    let mut oracle = StructuredOracle::new(
        ScriptedReasoner::new(vec![json!({"solution": "raise memoryOverhead"})]),
        Box::new(checker),
    );
    oracle.begin_run("task-9").unwrap();

    let mitigation = oracle.mitigate("stage retry", &graph).unwrap();
    assert!(!mitigation.confirmed);
    assert_eq!(mitigation.remediation.as_deref(), Some("raise memoryOverhead"));

    let seen = seen.lock().unwrap();
    assert_eq!(
        seen[0],
        MitigationCheck {
            task_id: "task-9".into(),
            anomaly: "stage retry".into(),
            cause: None,
            suggests: Some("raise memoryOverhead".into()),
        }
    );
}

#[test]
fn mitigate_requires_an_enabled_module() {
    let graph = make_graph();
    let mut oracle = oracle(vec![json!({"solution": "x"})]);
    let err = oracle.mitigate("namenode rpc latency", &graph).unwrap_err();
    assert!(matches!(
        err,
        CausewayError::Oracle(OracleError::ModuleNotFound { ref product }) if product == "thive"
    ));
}

#[test]
fn check_mitigation_names_the_cause() {
    let graph = make_graph();
    let checker = RecordingChecker {
        answer: true,
        ..Default::default()
    };
    let seen = checker.seen.clone();
    let mut oracle = StructuredOracle::new(ScriptedReasoner::default(), Box::new(checker));
    assert!(oracle
        .check_mitigation("stage retry", "executor lost", &graph)
        .unwrap());
    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].cause.as_deref(), Some("executor lost"));
    assert_eq!(seen[0].suggests, None);
}
