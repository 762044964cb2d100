//! # causeway-core
//!
//! Foundation crate for the Causeway diagnosis system.
//! Defines the diagnostic data model, errors, config, constants, and the
//! traits for the external collaborators the search engine talks to.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::CausewayConfig;
pub use errors::{CausewayError, CausewayResult};
pub use models::{
    BasisKind, CausalRelationship, DiagnosticBasis, DiagnosticItem, GraphSnapshot, Product,
    RootCauseFlag, Severity, TokenUsage,
};
