use serde::Serialize;

use crate::error::{Error, Result};
use crate::http::method::HttpMethod;
use crate::testing::{Performance, RunSummary};

use super::{Report, ReportFormatter, ReportItem};

/// Machine-readable report: one JSON document with every case and the totals.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    cases: Vec<JsonCase<'a>>,
    summary: RunSummary,
}

#[derive(Debug, Serialize)]
struct JsonCase<'a> {
    id: &'a str,
    category: &'static str,
    details: &'a str,
    method: HttpMethod,
    endpoint: String,
    passed: bool,
    status: &'static str,
    performance: Performance,
    elapsed_ms: f64,
    expected_status: u16,
    status_code: u16,
    status_line: &'a str,
    protocol: &'a str,
    content_length: Option<u64>,
    #[serde(skip_serializing_if = "str::is_empty")]
    expected_body: &'a str,
    body: &'a str,
}

impl<'a> From<&ReportItem<'a>> for JsonCase<'a> {
    fn from(item: &ReportItem<'a>) -> Self {
        let record = item.record;
        let case = &record.case;
        let response = &record.response;

        JsonCase {
            id: &case.id,
            category: item.analysis.type_label(),
            details: &case.details,
            method: case.method,
            endpoint: case.target(),
            passed: item.analysis.passed,
            status: item.analysis.status_label(),
            performance: item.analysis.performance,
            elapsed_ms: record.elapsed.as_secs_f64() * 1000.0,
            expected_status: case.expected_status,
            status_code: response.status_code,
            status_line: &response.status,
            protocol: &response.protocol,
            content_length: response.content_length,
            expected_body: &case.expected_body,
            body: &response.body,
        }
    }
}

impl ReportFormatter for JsonFormatter {
    fn render(&self, report: &Report<'_>) -> Result<String> {
        let doc = JsonReport {
            cases: report.items.iter().map(JsonCase::from).collect(),
            summary: report.summary,
        };
        let mut out = serde_json::to_string_pretty(&doc).map_err(Error::ReportEncode)?;
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::ObservedResponse;
    use crate::testing::{CaseDefinition, ResultRecord, ResultSequence};
    use std::time::Duration;

    #[test]
    fn renders_cases_and_summary() {
        let mut sequence = ResultSequence::new();
        sequence.append(ResultRecord::new(
            CaseDefinition::new("TC_01", HttpMethod::Get, "/hello", 200).expected_body("hi"),
            ObservedResponse {
                body: "hi".into(),
                status: "200 OK".into(),
                status_code: 200,
                protocol: "HTTP/1.1".into(),
                ..ObservedResponse::default()
            },
            Duration::from_millis(150),
        ));
        sequence.append(ResultRecord::new(
            CaseDefinition::new("TC_02", HttpMethod::Post, "/hello", 201),
            ObservedResponse {
                status: "405 Method Not Allowed".into(),
                status_code: 405,
                ..ObservedResponse::default()
            },
            Duration::from_millis(2500),
        ));

        let report = Report::analyze(&sequence);
        let rendered = JsonFormatter.render(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["summary"]["total"], 2);
        assert_eq!(value["summary"]["passed"], 1);
        assert_eq!(value["summary"]["failed"], 1);

        let cases = value["cases"].as_array().unwrap();
        assert_eq!(cases[0]["id"], "TC_01");
        assert_eq!(cases[0]["status"], "Passed");
        assert_eq!(cases[0]["performance"], "Good");
        assert_eq!(cases[0]["category"], "Happy path");
        assert_eq!(cases[0]["expected_body"], "hi");
        assert_eq!(cases[1]["method"], "POST");
        assert_eq!(cases[1]["status"], "Failed");
        assert_eq!(cases[1]["performance"], "Worst");
        assert_eq!(cases[1]["status_line"], "405 Method Not Allowed");
        assert!(cases[1].get("expected_body").is_none());
    }
}
