//! # Reporting
//!
//! Runs the analysis pass over a result sequence and renders the outcome as
//! plain text or JSON. Deciding the process exit code also lives here.

mod json;
mod text;

use std::fs;
use std::path::Path;

use tracing::info;

use crate::config::{Config, OutputFormat};
use crate::error::{Error, Result};
use crate::testing::{AnalyzedResult, ResultRecord, ResultSequence, RunSummary};

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// One analyzed record.
#[derive(Debug, Clone, Copy)]
pub struct ReportItem<'a> {
    pub record: &'a ResultRecord,
    pub analysis: AnalyzedResult,
}

/// Result of a full analysis pass.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    pub items: Vec<ReportItem<'a>>,
    pub summary: RunSummary,
}

impl<'a> Report<'a> {
    /// Analyze every non-empty record of `sequence` exactly once, counting
    /// into a fresh summary.
    pub fn analyze(sequence: &'a ResultSequence) -> Self {
        let mut summary = RunSummary::new();
        let items = sequence
            .iter()
            .filter(|record| !record.is_empty())
            .map(|record| ReportItem {
                record,
                analysis: summary.analyze(record),
            })
            .collect();

        info!(
            total = summary.total,
            passed = summary.passed,
            failed = summary.failed,
            "analysis pass complete"
        );

        Report { items, summary }
    }

    pub fn failures(&self) -> impl Iterator<Item = &ReportItem<'a>> {
        self.items.iter().filter(|item| !item.analysis.passed)
    }
}

/// Turns a report into its output form.
pub trait ReportFormatter {
    fn render(&self, report: &Report<'_>) -> Result<String>;
}

pub fn formatter_for(config: &Config) -> Box<dyn ReportFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::new(config)),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Write `output` wherever the configuration sends reports.
pub fn emit(output: &str, config: &Config) -> Result<()> {
    if config.output.writes_stdout() {
        print!("{output}");
    }

    if config.output.writes_file() {
        if let Some(path) = &config.report_path {
            write_report(path, output)?;
        }
    }

    Ok(())
}

fn write_report(path: &Path, output: &str) -> Result<()> {
    let to_error = |source: std::io::Error| Error::ReportWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, output).map_err(to_error)?;

    info!(path = %path.display(), "report written");
    Ok(())
}

/// Process exit code for a finished run: 1 if any case failed.
pub fn exit_code(summary: &RunSummary) -> i32 {
    if summary.has_failures() { 1 } else { 0 }
}
