//! # causeway-engine
//!
//! Drives one diagnosis run from the initial rule-based graph to a set of
//! fixed root causes. Each round the oracle selects an unresolved item; the
//! engine verifies it if its severity is unknown, expands it into suspects if
//! it is not a root cause, or mitigates it and carries the fix downstream.
//!
//! Every transition is appended to the run history, and the search is
//! bounded by the limits in [`SearchConfig`](causeway_core::config::SearchConfig).

pub mod backprop;
pub mod engine;
pub mod extractor;
pub mod history;
pub mod report;
mod search;
pub mod tracing_setup;

pub use backprop::{back_propagate, PropagatedFix};
pub use engine::DiagnosisEngine;
pub use extractor::SnapshotExtractor;
pub use history::{HistoryLog, JsonFileHistory};
pub use report::DiagnosisReport;
