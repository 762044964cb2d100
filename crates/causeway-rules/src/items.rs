use std::collections::HashSet;

use causeway_core::errors::ExtractionError;
use causeway_core::models::{BasisKind, DiagnosticBasis, DiagnosticItem, Product, Severity};

use crate::descriptions::RuleDescriptions;
use crate::report::RuleReport;

/// One item per rule result, in report order.
///
/// Results for `always_verify` products get severity `unknown` so the search
/// verifies them. A rule name seen twice keeps its first result.
pub fn extract_items(
    report: &RuleReport,
    descriptions: &RuleDescriptions,
    always_verify: &[Product],
) -> Result<Vec<DiagnosticItem>, ExtractionError> {
    let mut items = Vec::new();
    let mut seen = HashSet::new();

    for product_rules in &report.product_rule_list {
        let id = product_rules
            .product_id
            .as_i64()
            .ok_or_else(|| ExtractionError::InvalidReport {
                reason: format!("non-numeric productId {}", product_rules.product_id),
            })?;
        let product = Product::from_id(id).ok_or(ExtractionError::InvalidProduct { id })?;

        for group in &product_rules.children {
            let subtype = DiagnosticBasis::rule_subtype_for_group(&group.id);
            for rule in &group.children {
                let severity = if always_verify.contains(&product) {
                    Severity::Unknown
                } else {
                    rule.rule_result_status
                        .as_i64()
                        .and_then(Severity::from_status)
                        .ok_or_else(|| ExtractionError::InvalidSeverity {
                            value: rule.rule_result_status.to_string(),
                        })?
                };
                if !seen.insert(rule.rule_name.clone()) {
                    tracing::warn!(rule = %rule.rule_name, "duplicate rule name, keeping the first result");
                    continue;
                }

                let mut basis = DiagnosticBasis::new(BasisKind::Rule, &rule.rule_name)
                    .with_subtype(subtype);
                basis.description = descriptions
                    .lookup(product.as_str(), &group.id, &rule.rule_name)
                    .map(str::to_string);

                let mut item = DiagnosticItem::new(&rule.rule_name, product, severity).with_basis(basis);
                item.symptom = rule.reason.clone();
                item.suggested_fix = rule.suggest.clone();
                items.push(item);
            }
        }
    }
    Ok(items)
}
