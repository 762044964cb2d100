pub mod diagnostic_basis;
pub mod diagnostic_item;
pub mod history_entry;
pub mod product;
pub mod relationship;
pub mod root_cause_flag;
pub mod severity;
pub mod snapshot;
pub mod token_usage;

pub use diagnostic_basis::{BasisKind, DiagnosticBasis};
pub use diagnostic_item::DiagnosticItem;
pub use history_entry::{HistoryAction, HistoryEntry};
pub use product::Product;
pub use relationship::CausalRelationship;
pub use root_cause_flag::RootCauseFlag;
pub use severity::Severity;
pub use snapshot::GraphSnapshot;
pub use token_usage::TokenUsage;
