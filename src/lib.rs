//! Declarative HTTP API testing against an embedded server.
//!
//! Build [`CaseDefinition`]s, run them through an [`Instance`], and dump a
//! pass/fail report with latency buckets and run totals.

pub mod config;
pub mod error;
pub mod http;
pub mod instance;
pub mod logging;
pub mod report;
pub mod server;
pub mod testing;

pub use config::{Config, OutputFormat, OutputLevel, OutputTarget};
pub use error::{ConfigError, Error, Result};
pub use http::method::{HttpMethod, UnknownMethod};
pub use http::query::gen_path_param;
pub use instance::Instance;
pub use testing::{
    AnalyzedResult, CaseDefinition, CaseType, Performance, ResultRecord, ResultSequence,
    RunSummary,
};
