use std::path::PathBuf;

use causeway_core::config::ExtractionConfig;
use causeway_core::errors::CausewayResult;
use causeway_core::models::{DiagnosticItem, GraphSnapshot, Product, TokenUsage};
use causeway_core::traits::{Extraction, InitialExtractor, Reasoner};

use crate::causal::infer_relationships;
use crate::descriptions::RuleDescriptions;
use crate::items::extract_items;
use crate::report::RuleReport;

/// Production [`InitialExtractor`]: rule report in, starting graph out.
pub struct RuleExtractor<R: Reasoner> {
    reasoner: R,
    config: ExtractionConfig,
}

impl<R: Reasoner> RuleExtractor<R> {
    pub fn new(reasoner: R, config: ExtractionConfig) -> Self {
        Self { reasoner, config }
    }

    pub fn report_path(&self, task_id: &str) -> PathBuf {
        PathBuf::from(&self.config.data_dir)
            .join(task_id)
            .join(&self.config.rule_report_file)
    }

    pub fn descriptions_path(&self) -> PathBuf {
        PathBuf::from(&self.config.data_dir).join(&self.config.rule_descriptions_file)
    }

    /// Products with a module for `task_id`, starting from `base`.
    pub fn active_products(&self, task_id: &str, base: &[Product]) -> CausewayResult<Vec<Product>> {
        Ok(RuleReport::load(&self.report_path(task_id))?.active_products(base))
    }

    pub fn reasoner(&self) -> &R {
        &self.reasoner
    }
}

impl<R: Reasoner> InitialExtractor for RuleExtractor<R> {
    fn extract(&mut self, task_id: &str) -> CausewayResult<Extraction> {
        let report = RuleReport::load(&self.report_path(task_id))?;
        let descriptions = RuleDescriptions::load(&self.descriptions_path())?;
        let items = extract_items(&report, &descriptions, &self.config.always_verify_products)?;

        let anomalies: Vec<DiagnosticItem> =
            items.iter().filter(|i| !i.is_normal()).cloned().collect();
        let (edges, usage) = if anomalies.len() < 2 {
            (Vec::new(), TokenUsage::default())
        } else {
            self.reasoner.begin_task(task_id)?;
            infer_relationships(&mut self.reasoner, &anomalies, self.config.causal_samples)?
        };

        tracing::info!(
            task_id = %task_id,
            items = items.len(),
            anomalies = anomalies.len(),
            edges = edges.len(),
            "rule report extracted"
        );
        Ok(Extraction {
            graph: GraphSnapshot::new(items, edges),
            usage,
        })
    }
}
