//! [`DiagnosisEngine`]: owns the collaborators of a diagnosis run and drives it.

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use causeway_core::config::SearchConfig;
use causeway_core::errors::CausewayResult;
use causeway_core::models::HistoryAction;
use causeway_core::traits::{HistorySink, InitialExtractor, Reasoner, Summarizer};
use causeway_core::CausewayConfig;
use causeway_graph::DiagnosticState;
use causeway_oracle::{
    checker_from_config, CachingReasoner, DecisionOracle, ReasonerSummarizer, StructuredOracle,
};
use causeway_rules::RuleExtractor;

use crate::history::{HistoryLog, JsonFileHistory};
use crate::report::DiagnosisReport;
use crate::search::{Search, SearchOutcome};
use crate::tracing_setup::events;

/// The root-cause search engine.
///
/// One engine runs one diagnosis at a time; each run builds its own graph, so
/// separate engines can diagnose separate tasks side by side.
pub struct DiagnosisEngine {
    extractor: Box<dyn InitialExtractor>,
    oracle: Box<dyn DecisionOracle>,
    summarizer: Box<dyn Summarizer>,
    history_sink: Option<Box<dyn HistorySink>>,
    search: SearchConfig,
}

impl DiagnosisEngine {
    pub fn new(
        extractor: Box<dyn InitialExtractor>,
        oracle: Box<dyn DecisionOracle>,
        summarizer: Box<dyn Summarizer>,
    ) -> Self {
        Self {
            extractor,
            oracle,
            summarizer,
            history_sink: None,
            search: SearchConfig::default(),
        }
    }

    /// Production wiring over one reasoning backend: rule-report extraction,
    /// the structured oracle with its replies cached under the task's results
    /// directory, a reasoner-written summary and a JSON history file.
    pub fn from_config<R>(reasoner: R, config: &CausewayConfig) -> CausewayResult<Self>
    where
        R: Reasoner + Clone + 'static,
    {
        config.validate()?;
        let cached = |inner: R| {
            CachingReasoner::new(inner, &config.extraction.data_dir)
                .with_results_dir(&config.history.results_dir)
        };

        let extractor = RuleExtractor::new(cached(reasoner.clone()), config.extraction.clone());
        let checker = checker_from_config(&config.oracle)?;
        let oracle = StructuredOracle::from_config(cached(reasoner.clone()), checker, config);
        let summarizer = ReasonerSummarizer::new(reasoner);

        let mut engine = Self::new(Box::new(extractor), Box::new(oracle), Box::new(summarizer))
            .with_search_config(config.search.clone());
        if config.history.persist {
            engine = engine.with_history_sink(Box::new(JsonFileHistory::from_config(
                &config.extraction,
                &config.history,
            )));
        }
        Ok(engine)
    }

    pub fn with_history_sink(mut self, sink: Box<dyn HistorySink>) -> Self {
        self.history_sink = Some(sink);
        self
    }

    pub fn with_search_config(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    /// Diagnose `task_id` from its initial graph to a set of fixed root causes.
    ///
    /// Any error aborts the run without a partial result. Steps recorded
    /// before the failure are still in the history sink.
    pub fn run(&mut self, task_id: &str) -> CausewayResult<DiagnosisReport> {
        let run_id = Uuid::new_v4();
        let span = crate::diagnosis_span!(task_id, run_id);
        let _guard = span.enter();
        let started_at = Utc::now();

        let mut history = HistoryLog::with_sink(task_id, self.history_sink.take());
        let outcome = self.diagnose(task_id, &mut history);
        let usage = history.total_usage();
        let (entries, sink) = history.into_parts();
        self.history_sink = sink;
        let (state, outcome) = outcome?;

        let summary = self.summarizer.summarize(task_id, &entries)?;
        let unresolved: Vec<String> = state.blocking().iter().map(|item| item.name.clone()).collect();
        events::run_finished(task_id, &outcome.root_causes, &unresolved);

        Ok(DiagnosisReport {
            run_id,
            task_id: task_id.to_string(),
            root_causes: outcome.root_causes,
            summary,
            unresolved,
            abandoned: outcome.abandoned,
            usage,
            state: state.snapshot(),
            history: entries,
            started_at,
            finished_at: Utc::now(),
        })
    }

    fn diagnose(
        &mut self,
        task_id: &str,
        history: &mut HistoryLog,
    ) -> CausewayResult<(DiagnosticState, SearchOutcome)> {
        let extraction = self.extractor.extract(task_id)?;
        let mut state = DiagnosticState::from_snapshot(extraction.graph)?;
        history.record(
            HistoryAction::CausalAnalysis,
            Vec::new(),
            json!({
                "items": state.len(),
                "relationships": state.edge_count(),
            }),
            &state,
            extraction.usage,
        )?;
        events::initial_graph_extracted(task_id, state.len(), state.edge_count());

        self.oracle.begin_run(task_id)?;
        let outcome = Search::new(
            task_id,
            &mut *self.oracle,
            &self.search,
            &mut state,
            history,
        )
        .run()?;
        Ok((state, outcome))
    }
}
