//! # causeway-rules
//!
//! Turns the report of the deterministic rule checks into the starting graph
//! of a diagnosis run: one item per rule result, plus causal edges between
//! the abnormal ones inferred by a reasoning service.

pub mod causal;
pub mod descriptions;
pub mod extractor;
pub mod items;
pub mod report;

pub use causal::{infer_relationships, merge_relationship_samples};
pub use descriptions::RuleDescriptions;
pub use extractor::RuleExtractor;
pub use items::extract_items;
pub use report::RuleReport;
