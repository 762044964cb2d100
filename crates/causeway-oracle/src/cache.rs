//! Artifact cache that makes reasoning calls replayable.
//!
//! Every reply is written to
//! `<root>/<task_id>/<results_dir>/step{n}_{task}[_s{k}].json`. On a re-run
//! the same sequence of requests finds those files and replays them instead
//! of calling the backend, so a diagnosis run over existing artifacts
//! produces the same structural result.

use std::path::{Path, PathBuf};

use causeway_core::config::defaults;
use causeway_core::errors::{CausewayError, CausewayResult};
use causeway_core::traits::{Reasoner, ReasoningReply, ReasoningRequest};

pub struct CachingReasoner<R: Reasoner> {
    inner: R,
    root: PathBuf,
    results_dir: String,
    task_id: String,
    step: usize,
    hits: usize,
}

impl<R: Reasoner> CachingReasoner<R> {
    pub fn new(inner: R, root: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            root: root.into(),
            results_dir: defaults::DEFAULT_RESULTS_DIR.to_string(),
            task_id: String::new(),
            step: 0,
            hits: 0,
        }
    }

    pub fn with_results_dir(mut self, results_dir: impl Into<String>) -> Self {
        self.results_dir = results_dir.into();
        self
    }

    /// Replies served from disk since the current task began.
    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Path of the artifact for `request` at the current step.
    pub fn artifact_path(&self, request: &ReasoningRequest) -> PathBuf {
        let file = if request.sample == 0 {
            format!("step{}_{}.json", self.step, request.task)
        } else {
            format!("step{}_{}_s{}.json", self.step, request.task, request.sample)
        };
        self.root
            .join(&self.task_id)
            .join(&self.results_dir)
            .join(file)
    }

    fn load(path: &Path) -> CausewayResult<ReasoningReply> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CausewayError::io(path.display().to_string(), e))?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn store(path: &Path, reply: &ReasoningReply) -> CausewayResult<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| CausewayError::io(dir.display().to_string(), e))?;
        }
        let json = serde_json::to_string_pretty(reply)?;
        std::fs::write(path, json).map_err(|e| CausewayError::io(path.display().to_string(), e))
    }
}

impl<R: Reasoner> Reasoner for CachingReasoner<R> {
    fn begin_task(&mut self, task_id: &str) -> CausewayResult<()> {
        self.task_id = task_id.to_string();
        self.step = 0;
        self.hits = 0;
        self.inner.begin_task(task_id)
    }

    fn reason(&mut self, request: &ReasoningRequest) -> CausewayResult<ReasoningReply> {
        // Samples of one question share a step.
        if request.sample == 0 {
            self.step += 1;
        }
        let path = self.artifact_path(request);
        if path.exists() {
            self.hits += 1;
            tracing::debug!(path = %path.display(), "replaying cached reply");
            return Self::load(&path);
        }
        let reply = self.inner.reason(request)?;
        Self::store(&path, &reply)?;
        Ok(reply)
    }
}
