use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How much of each case block the text report prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLevel {
    /// Header and footer only.
    Quiet,
    #[default]
    Default,
    /// Adds protocol and content length to failed cases.
    Verbose,
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Where a rendered report goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    #[default]
    Stdout,
    File,
    Both,
}

impl OutputTarget {
    pub fn writes_stdout(&self) -> bool {
        matches!(self, OutputTarget::Stdout | OutputTarget::Both)
    }

    pub fn writes_file(&self) -> bool {
        matches!(self, OutputTarget::File | OutputTarget::Both)
    }
}

impl Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OutputTarget::Stdout => "stdout",
            OutputTarget::File => "file",
            OutputTarget::Both => "both",
        };
        write!(f, "{label}")
    }
}

/// Run configuration. Every field has a default, so a TOML file only needs
/// the keys it changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub level: OutputLevel,
    /// Print the response body for passed cases too.
    pub show_result: bool,
    pub format: OutputFormat,
    /// Wrap statuses and performance labels in ANSI colour codes.
    pub color: bool,
    pub output: OutputTarget,
    pub report_path: Option<PathBuf>,
    /// Terminate the process with exit code 1 after dumping if any case failed.
    pub exit_on_failure: bool,
    /// Per-request timeout enforced by the HTTP client. No timeout when unset.
    pub request_timeout_ms: Option<u64>,
}

impl Config {
    /// Load a TOML config file. Missing keys fall back to defaults; the result
    /// is validated before it is returned.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.level == OutputLevel::Quiet && self.show_result {
            return Err(ConfigError::ConflictingOutputModes);
        }

        if self.output.writes_file() && self.report_path.is_none() {
            return Err(ConfigError::MissingReportPath(self.output.to_string()));
        }

        if self.request_timeout_ms == Some(0) {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(())
    }
}
