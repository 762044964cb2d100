//! # causeway-oracle
//!
//! The judgement calls the search engine cannot make itself: which item to
//! work on, what could have caused an anomaly, whether a suspect is really
//! abnormal, and how to fix a root cause.
//!
//! [`DecisionOracle`] is the contract. [`StructuredOracle`] implements it on
//! top of any [`Reasoner`](causeway_core::traits::Reasoner) by exchanging JSON,
//! and [`ReplayOracle`] returns pre-recorded results for deterministic runs.

pub mod cache;
pub mod checker;
pub mod oracle;
pub mod replay;
pub mod structured;
pub mod summary;

pub use cache::CachingReasoner;
pub use checker::{checker_from_config, HttpChecker, HttpCheckerConfig, OfflineChecker};
pub use oracle::{DecisionOracle, Expansion, Mitigation, Selection, SuspectProposal, Verification};
pub use replay::{ReplayOracle, ReplayScript};
pub use structured::StructuredOracle;
pub use summary::{DigestSummarizer, ReasonerSummarizer};
