//! Span definitions for a diagnosis run and the items resolved inside it.

/// Create the span wrapping one diagnosis run.
#[macro_export]
macro_rules! diagnosis_span {
    ($task_id:expr, $run_id:expr) => {
        tracing::info_span!("causeway.diagnosis", task_id = %$task_id, run_id = %$run_id)
    };
}

/// Create the span for resolving one item.
#[macro_export]
macro_rules! resolve_span {
    ($item:expr, $depth:expr) => {
        tracing::debug_span!("causeway.resolve", item = %$item, depth = $depth)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const DIAGNOSIS: &str = "causeway.diagnosis";
    pub const RESOLVE: &str = "causeway.resolve";
}
