mod causeway_error;
mod extraction_error;
mod graph_error;
mod oracle_error;

pub use causeway_error::{CausewayError, CausewayResult};
pub use extraction_error::ExtractionError;
pub use graph_error::GraphError;
pub use oracle_error::OracleError;
