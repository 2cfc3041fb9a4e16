use std::fmt::{self, Display};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::testing::case::CaseType;
use crate::testing::results::ResultRecord;

/// Latency tier of a response. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Performance {
    /// Under 100ms.
    Best,
    /// 100ms up to 300ms.
    Good,
    /// 300ms up to 1s.
    Acceptable,
    /// 1s up to 2s.
    Poor,
    /// 2s and above.
    Worst,
}

impl Performance {
    pub fn from_elapsed(elapsed: Duration) -> Self {
        match elapsed.as_millis() {
            0..100 => Performance::Best,
            100..300 => Performance::Good,
            300..1000 => Performance::Acceptable,
            1000..2000 => Performance::Poor,
            _ => Performance::Worst,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Performance::Best => "Best",
            Performance::Good => "Good",
            Performance::Acceptable => "Acceptable",
            Performance::Poor => "Poor",
            Performance::Worst => "Worst",
        }
    }

    /// ANSI SGR code used when the text report is coloured.
    pub fn ansi_code(&self) -> &'static str {
        match self {
            Performance::Best => "1;32",
            Performance::Good => "1;34",
            Performance::Acceptable => "1;33",
            Performance::Poor => "1;35",
            Performance::Worst => "1;31",
        }
    }
}

impl Display for Performance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classification of one record. Recomputed on every analysis pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzedResult {
    pub passed: bool,
    pub performance: Performance,
    pub case_type: CaseType,
}

impl AnalyzedResult {
    pub fn status_label(&self) -> &'static str {
        if self.passed { "Passed" } else { "Failed" }
    }

    pub fn type_label(&self) -> &'static str {
        self.case_type.label()
    }
}

/// Classify `record` without touching any counters.
pub fn analyze(record: &ResultRecord) -> AnalyzedResult {
    let case = &record.case;
    let status_matches = record.response.status_code == case.expected_status;
    let body_matches = case.expected_body.is_empty() || case.expected_body == record.response.body;

    AnalyzedResult {
        passed: status_matches && body_matches,
        performance: Performance::from_elapsed(record.elapsed),
        case_type: case.case_type,
    }
}

/// Running pass/fail totals of a test run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `record` and count it. Call once per record per pass.
    pub fn analyze(&mut self, record: &ResultRecord) -> AnalyzedResult {
        let result = analyze(record);
        self.total += 1;
        if result.passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        result
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
