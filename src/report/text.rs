use std::fmt::Write;

use crate::config::{Config, OutputLevel};
use crate::error::Result;
use crate::testing::RunSummary;

use super::{Report, ReportFormatter, ReportItem};

const HEADER: &str = "Running API testing...\n\n";
const MAX_BODY_SNIPPET_CHARS: usize = 1024;
const PASSED_CODE: &str = "1;32";
const FAILED_CODE: &str = "1;31";

/// Human-readable console report.
#[derive(Debug, Clone)]
pub struct TextFormatter {
    level: OutputLevel,
    show_result: bool,
    color: bool,
}

impl TextFormatter {
    pub fn new(config: &Config) -> Self {
        Self {
            level: config.level,
            show_result: config.show_result,
            color: config.color,
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn item(&self, item: &ReportItem<'_>) -> String {
        let record = item.record;
        let case = &record.case;
        let analysis = &item.analysis;
        let performance = self.paint(analysis.performance.ansi_code(), analysis.performance.label());
        let mut out = String::new();

        if analysis.passed {
            let status = self.paint(PASSED_CODE, analysis.status_label());
            let _ = writeln!(out, "Test case {status:<7} with {performance} performance [ {} ]", case.id);
        } else {
            let status = self.paint(FAILED_CODE, analysis.status_label());
            let _ = writeln!(out, "Test case {status:<7} [ {} ]", case.id);
        }

        line(&mut out, false, "Details", &case.details);
        line(&mut out, false, "Endpoint", &format!("{} {}", case.method, case.target()));
        line(&mut out, false, "Type", analysis.type_label());

        let elapsed = format!("{:?}", record.elapsed);
        let body = body_snippet(&record.response.body);

        if analysis.passed {
            if self.show_result {
                line(&mut out, false, "Time", &elapsed);
                line(&mut out, true, "Result", &body);
            } else {
                line(&mut out, true, "Time", &elapsed);
            }
        } else {
            line(&mut out, false, "Time", &elapsed);
            line(&mut out, false, "Performance", &performance);
            let actual = self.paint(FAILED_CODE, &record.response.status_code.to_string());
            line(
                &mut out,
                false,
                "Status",
                &format!(
                    "Expected {}, but got {actual} ({})",
                    case.expected_status, record.response.status
                ),
            );
            if !case.expected_body.is_empty() {
                line(&mut out, false, "Expected", &body_snippet(&case.expected_body));
            }

            if self.level == OutputLevel::Verbose {
                let response = &record.response;
                line(
                    &mut out,
                    false,
                    "Protocol",
                    &format!(
                        "{} ({}, {})",
                        response.protocol, response.protocol_major, response.protocol_minor
                    ),
                );
                let length = response
                    .content_length
                    .map_or_else(|| "unknown".to_string(), |len| len.to_string());
                line(&mut out, false, "Content Length", &length);
            }

            line(&mut out, true, "Result", &body);
        }

        out.push('\n');
        out
    }
}

impl ReportFormatter for TextFormatter {
    fn render(&self, report: &Report<'_>) -> Result<String> {
        let mut out = String::from(HEADER);

        if self.level != OutputLevel::Quiet {
            for item in &report.items {
                out.push_str(&self.item(item));
            }
        }

        out.push_str(&footer(&report.summary));
        Ok(out)
    }
}

fn line(out: &mut String, last: bool, label: &str, value: &str) {
    let branch = if last { "└─" } else { "├─" };
    let _ = writeln!(out, "  {branch} {label:<15} : {value}");
}

fn footer(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<23} : {}", "total test cases", summary.total);
    let _ = writeln!(
        out,
        "{:<23} : {}/{}",
        "total passed test cases", summary.passed, summary.total
    );
    let _ = writeln!(
        out,
        "{:<23} : {}/{}",
        "total failed test cases", summary.failed, summary.total
    );
    out
}

/// Body without trailing newlines, cut to a bounded number of characters.
fn body_snippet(body: &str) -> String {
    let trimmed = body.trim_end_matches(['\r', '\n']);
    let mut chars = trimmed.char_indices();
    match chars.nth(MAX_BODY_SNIPPET_CHARS) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::method::HttpMethod;
    use crate::http::response::ObservedResponse;
    use crate::testing::{CaseDefinition, CaseType, ResultRecord, ResultSequence};
    use std::time::Duration;

    fn sequence() -> ResultSequence {
        let ok = ResultRecord::new(
            CaseDefinition::new("TC_01", HttpMethod::Get, "/hello", 200)
                .case_type(CaseType::SmokeCase)
                .details("Sample case"),
            ObservedResponse {
                body: "{\"message\":\"hello world!\"}\n".into(),
                status: "200 OK".into(),
                status_code: 200,
                protocol: "HTTP/1.1".into(),
                protocol_major: 1,
                protocol_minor: 1,
                content_length: Some(27),
                ..ObservedResponse::default()
            },
            Duration::from_millis(4),
        );
        let mut bad = ok.clone();
        bad.case = CaseDefinition::new("TC_02", HttpMethod::Get, "/hello", 400).details("Another sample case");

        let mut sequence = ResultSequence::new();
        sequence.append(ok);
        sequence.append(bad);
        sequence
    }

    fn render(config: Config) -> String {
        let sequence = sequence();
        let report = Report::analyze(&sequence);
        TextFormatter::new(&config).render(&report).unwrap()
    }

    #[test]
    fn passed_and_failed_blocks() {
        let out = render(Config::default());

        assert!(out.starts_with(HEADER));
        assert!(out.contains("Test case Passed  with Best performance [ TC_01 ]"));
        assert!(out.contains("  ├─ Type            : Smoke case\n"));
        assert!(out.contains("  └─ Time            : 4ms\n"));
        assert!(out.contains("Test case Failed  [ TC_02 ]"));
        assert!(out.contains("Expected 400, but got 200 (200 OK)"));
        assert!(out.contains("  └─ Result          : {\"message\":\"hello world!\"}\n"));
        assert!(!out.contains("Protocol"));
        assert!(out.ends_with(
            "total test cases        : 2\n\
             total passed test cases : 1/2\n\
             total failed test cases : 1/2\n"
        ));
    }

    #[test]
    fn show_result_prints_passed_body() {
        let out = render(Config {
            show_result: true,
            ..Config::default()
        });
        assert!(out.contains("  ├─ Time            : 4ms\n"));
        assert_eq!(out.matches("Result          : {\"message\"").count(), 2);
    }

    #[test]
    fn verbose_adds_protocol_details_to_failures() {
        let out = render(Config {
            level: OutputLevel::Verbose,
            ..Config::default()
        });
        assert!(out.contains("Protocol        : HTTP/1.1 (1, 1)"));
        assert!(out.contains("Content Length  : 27"));
    }

    #[test]
    fn quiet_prints_only_header_and_footer() {
        let out = render(Config {
            level: OutputLevel::Quiet,
            ..Config::default()
        });
        assert!(!out.contains("Test case"));
        assert!(out.contains("total failed test cases : 1/2"));
    }

    #[test]
    fn color_wraps_labels() {
        let out = render(Config {
            color: true,
            ..Config::default()
        });
        assert!(out.contains("\x1b[1;32mPassed\x1b[0m"));
        assert!(out.contains("\x1b[1;31mFailed\x1b[0m"));
        assert!(out.contains("\x1b[1;32mBest\x1b[0m"));
    }

    #[test]
    fn long_bodies_are_cut() {
        let body = "x".repeat(MAX_BODY_SNIPPET_CHARS + 10);
        let snippet = body_snippet(&body);
        assert_eq!(snippet.len(), MAX_BODY_SNIPPET_CHARS + 3);
        assert!(snippet.ends_with("..."));
        assert_eq!(body_snippet("ok\r\n"), "ok");
    }
}
