use causeway_core::models::*;
use proptest::prelude::*;

#[test]
fn product_ids_round_trip() {
    for product in Product::ALL {
        assert_eq!(Product::from_id(product.id()), Some(product));
    }
    assert_eq!(Product::from_id(42), None);
}

#[test]
fn unknown_product_name_falls_back_to_other() {
    assert_eq!(Product::from_name("HDFS"), Product::Hdfs);
    assert_eq!(Product::from_name("kafka"), Product::Other);
    let parsed: Product = serde_json::from_str("\"kafka\"").unwrap();
    assert_eq!(parsed, Product::Other);
}

#[test]
fn severity_classification() {
    assert!(Severity::Unknown.is_unknown());
    assert!(Severity::Normal.is_normal());
    for s in [Severity::Minor, Severity::Major, Severity::Critical] {
        assert!(s.is_abnormal());
    }
    assert!(!Severity::Unknown.is_abnormal());
    assert_eq!(Severity::from_status(-1), Some(Severity::Unknown));
    assert_eq!(Severity::from_name("CRITICAL"), Some(Severity::Critical));
    assert_eq!(Severity::from_name("fatal"), None);
}

#[test]
fn basis_kind_parses_leniently() {
    assert_eq!(BasisKind::parse_lenient("LOG"), BasisKind::Log);
    assert_eq!(BasisKind::parse_lenient("metrics+logs"), BasisKind::Mixed);
    let parsed: BasisKind = serde_json::from_str("\"mix\"").unwrap();
    assert_eq!(parsed, BasisKind::Mixed);
}

#[test]
fn rule_subtype_follows_group_prefix() {
    assert_eq!(DiagnosticBasis::rule_subtype_for_group("metric_gc"), "metric-based");
    assert_eq!(DiagnosticBasis::rule_subtype_for_group("resource_mem"), "resource-based");
    assert_eq!(DiagnosticBasis::rule_subtype_for_group("exception"), "log-based");
}

#[test]
fn suspect_flag_cannot_be_set_before_verification() {
    let mut item = DiagnosticItem::suspect("slow shuffle", Product::Spark);
    assert!(item.set_root_cause_flag(true).is_err());
    assert!(item.is_possible_root_cause().is_err());

    item.resolve_severity(Severity::Major).unwrap();
    item.set_root_cause_flag(true).unwrap();
    assert!(item.is_possible_root_cause().unwrap());
}

#[test]
fn severity_resolves_only_once_and_never_to_unknown() {
    let mut item = DiagnosticItem::suspect("oom", Product::Yarn);
    assert!(item.resolve_severity(Severity::Unknown).is_err());
    item.resolve_severity(Severity::Normal).unwrap();
    assert!(item.resolve_severity(Severity::Major).is_err());
}

#[test]
fn deserialized_suspect_with_flag_fails_validation() {
    let raw = serde_json::json!({
        "name": "x",
        "product": "spark",
        "severity": "unknown",
        "possible_root_cause": "root_cause"
    });
    let item: DiagnosticItem = serde_json::from_value(raw).unwrap();
    assert!(item.validate().is_err());
}

#[test]
fn legacy_field_names_are_accepted() {
    let raw = serde_json::json!({
        "name": "x",
        "product": "yarn",
        "severity": "major",
        "expert_analysis": "container killed",
        "expert_suggests": "raise memory"
    });
    let item: DiagnosticItem = serde_json::from_value(raw).unwrap();
    assert_eq!(item.analysis.as_deref(), Some("container killed"));
    assert_eq!(item.suggested_fix.as_deref(), Some("raise memory"));
}

#[test]
fn token_usage_accumulates() {
    let mut usage = TokenUsage::new(10, 5);
    usage += TokenUsage::new(1, 2);
    assert_eq!(usage, TokenUsage { sent: 11, received: 7, total: 18 });
}

proptest! {
    #[test]
    fn fixed_is_monotonic(calls in 1_usize..10) {
        let mut item = DiagnosticItem::new("a", Product::Spark, Severity::Major);
        let mut changes = 0;
        for _ in 0..calls {
            if item.mark_fixed() {
                changes += 1;
            }
            prop_assert!(item.is_fixed());
        }
        prop_assert_eq!(changes, 1);
    }
}
