//! Typed errors for configuration, case execution and reporting.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration validation errors, reported before any case runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Quiet output suppresses case blocks, so there is nowhere to show bodies
    #[error("output level `quiet` conflicts with `show_result = true`")]
    ConflictingOutputModes,

    /// File output selected without a destination
    #[error("output `{0}` requires `report_path` to be set")]
    MissingReportPath(String),

    /// request_timeout_ms is zero
    #[error("request_timeout_ms must be greater than 0")]
    InvalidTimeout,

    #[error("failed to read config file `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file `{path}`: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid header `{name}`: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("failed to encode request body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("request to `{url}` failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read response from `{url}`: {source}")]
    ReadResponse {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("test server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("failed to encode JSON report: {0}")]
    ReportEncode(#[source] serde_json::Error),

    #[error("failed to write report file `{path}`: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
