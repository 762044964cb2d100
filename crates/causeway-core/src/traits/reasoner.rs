use serde::{Deserialize, Serialize};

use crate::errors::CausewayResult;
use crate::models::TokenUsage;

/// The judgement calls a reasoning service is asked to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningTask {
    CausalAnalysis,
    Select,
    Expand,
    Verify,
    Mitigate,
    Summarize,
}

impl ReasoningTask {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CausalAnalysis => "causal_analysis",
            Self::Select => "select",
            Self::Expand => "expand",
            Self::Verify => "verify",
            Self::Mitigate => "mitigate",
            Self::Summarize => "summarize",
        }
    }
}

impl std::fmt::Display for ReasoningTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured question for the reasoning service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningRequest {
    pub task: ReasoningTask,
    /// Index of this sample when the same question is asked several times.
    pub sample: usize,
    /// JSON context: graph views, the item under consideration, etc.
    pub context: serde_json::Value,
}

impl ReasoningRequest {
    pub fn new(task: ReasoningTask, context: serde_json::Value) -> Self {
        Self {
            task,
            sample: 0,
            context,
        }
    }

    pub fn with_sample(mut self, sample: usize) -> Self {
        self.sample = sample;
        self
    }
}

/// Structured answer from the reasoning service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningReply {
    pub content: serde_json::Value,
    #[serde(default)]
    pub usage: TokenUsage,
}

impl ReasoningReply {
    pub fn new(content: serde_json::Value) -> Self {
        Self {
            content,
            usage: TokenUsage::default(),
        }
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = usage;
        self
    }
}

/// External generation backend. May be slow and non-deterministic; calls are blocking.
pub trait Reasoner: Send {
    /// Called once at the start of each diagnosis run.
    fn begin_task(&mut self, _task_id: &str) -> CausewayResult<()> {
        Ok(())
    }

    fn reason(&mut self, request: &ReasoningRequest) -> CausewayResult<ReasoningReply>;
}
