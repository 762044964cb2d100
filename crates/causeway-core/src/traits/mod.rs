pub mod extractor;
pub mod history_sink;
pub mod mitigation_checker;
pub mod reasoner;
pub mod summarizer;

pub use extractor::{Extraction, InitialExtractor};
pub use history_sink::HistorySink;
pub use mitigation_checker::{MitigationCheck, MitigationChecker};
pub use reasoner::{Reasoner, ReasoningReply, ReasoningRequest, ReasoningTask};
pub use summarizer::Summarizer;
