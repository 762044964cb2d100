//! # causeway-graph
//!
//! The diagnostic state of one diagnosis run: every item discovered so far
//! and the directed causal edges between them.
//!
//! Items live in a petgraph `StableGraph` with a name index on the side, so
//! name resolution is O(1) and node indices survive removals. Insertion order
//! is tracked separately because it is the discovery order the search and the
//! reasoning service both rely on.

pub mod context;
pub mod edge;
pub mod filter;
pub mod query;
pub mod state;

pub use context::{ContextEntry, ContextOptions, LinkedItem};
pub use edge::CausalEdge;
pub use filter::ItemFilter;
pub use state::DiagnosticState;
