//! # Test cases and results
//!
//! Case definitions, the append-only result sequence, and the analysis
//! step that classifies each result and keeps the run totals.

pub mod analyze;
pub mod case;
pub mod results;

pub use analyze::{AnalyzedResult, Performance, RunSummary, analyze};
pub use case::{CaseDefinition, CaseType};
pub use results::{ResultRecord, ResultSequence};
