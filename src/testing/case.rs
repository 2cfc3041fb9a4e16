use std::collections::HashMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::http::method::HttpMethod;
use crate::http::query::gen_path_param;

/// Category a case belongs to. Only used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseType {
    #[default]
    HappyPath,
    EdgeCase,
    NegativeCase,
    BoundaryCase,
    CornerCase,
    StressCase,
    SmokeCase,
    RegressionCase,
    IntegrationCase,
    /// Any category name this crate does not know.
    #[serde(other)]
    Unknown,
}

impl CaseType {
    pub const ALL: [CaseType; 9] = [
        CaseType::HappyPath,
        CaseType::EdgeCase,
        CaseType::NegativeCase,
        CaseType::BoundaryCase,
        CaseType::CornerCase,
        CaseType::StressCase,
        CaseType::SmokeCase,
        CaseType::RegressionCase,
        CaseType::IntegrationCase,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CaseType::HappyPath => "Happy path",
            CaseType::EdgeCase => "Edge case",
            CaseType::NegativeCase => "Negative case",
            CaseType::BoundaryCase => "Boundary case",
            CaseType::CornerCase => "Corner case",
            CaseType::StressCase => "Stress case",
            CaseType::SmokeCase => "Smoke case",
            CaseType::RegressionCase => "Regression case",
            CaseType::IntegrationCase => "Integration case",
            CaseType::Unknown => "Unknown",
        }
    }
}

impl Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One HTTP request to issue against the test server and the outcome it
/// is expected to produce.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseDefinition {
    /// Display identifier. Not required to be unique.
    pub id: String,
    pub case_type: CaseType,
    pub details: String,
    /// Path relative to the server base URL, e.g. `/hello`.
    pub endpoint: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    /// Sent as `Content-Type` when non-empty.
    pub body_type: String,
    /// Query string appended verbatim to the endpoint, including the leading `?`.
    pub query: String,
    /// Serialized as JSON and sent as the request body.
    pub body: Option<serde_json::Value>,
    pub expected_status: u16,
    /// Exact body the response must carry. Empty disables the body check.
    pub expected_body: String,
    /// Skipped cases are never executed nor recorded.
    pub skip: bool,
}

impl CaseDefinition {
    pub fn new(
        id: impl Into<String>,
        method: HttpMethod,
        endpoint: impl Into<String>,
        expected_status: u16,
    ) -> Self {
        Self {
            id: id.into(),
            method,
            endpoint: endpoint.into(),
            expected_status,
            ..Self::default()
        }
    }

    pub fn case_type(mut self, case_type: CaseType) -> Self {
        self.case_type = case_type;
        self
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn body_type(mut self, body_type: impl Into<String>) -> Self {
        self.body_type = body_type.into();
        self
    }

    /// Encode `params` with [`gen_path_param`] and use it as the query string.
    pub fn query_params(mut self, params: &HashMap<String, String>) -> Result<Self> {
        self.query = gen_path_param(params)?;
        Ok(self)
    }

    /// Convert `body` into a JSON value to send as the request body.
    pub fn json_body<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn expected_body(mut self, expected_body: impl Into<String>) -> Self {
        self.expected_body = expected_body.into();
        self
    }

    pub fn skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    /// Endpoint followed by the query string, as sent on the wire.
    pub fn target(&self) -> String {
        format!("{}{}", self.endpoint, self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn labels_cover_every_category() {
        let labels: Vec<&str> = CaseType::ALL.iter().map(CaseType::label).collect();
        assert_eq!(
            labels,
            vec![
                "Happy path",
                "Edge case",
                "Negative case",
                "Boundary case",
                "Corner case",
                "Stress case",
                "Smoke case",
                "Regression case",
                "Integration case",
            ]
        );
        assert_eq!(CaseType::Unknown.label(), "Unknown");
    }

    #[test]
    fn unrecognized_category_maps_to_unknown() {
        let case_type: CaseType = serde_json::from_str("\"chaos_case\"").unwrap();
        assert_eq!(case_type, CaseType::Unknown);

        let case_type: CaseType = serde_json::from_str("\"smoke_case\"").unwrap();
        assert_eq!(case_type, CaseType::SmokeCase);
    }

    #[test]
    fn builder_sets_request_shape() {
        let params = HashMap::from([("page".to_string(), "2".to_string())]);
        let case = CaseDefinition::new("TC_07", HttpMethod::Post, "/users", 201)
            .case_type(CaseType::IntegrationCase)
            .details("create a user")
            .header("X-Trace", "abc")
            .body_type("application/json")
            .query_params(&params)
            .unwrap()
            .json_body(&serde_json::json!({ "name": "ada" }))
            .unwrap();

        assert_eq!(case.target(), "/users?page=2");
        assert_eq!(case.headers.get("X-Trace").map(String::as_str), Some("abc"));
        assert_eq!(case.body, Some(serde_json::json!({ "name": "ada" })));
        assert_eq!(case.expected_status, 201);
        assert!(case.expected_body.is_empty());
        assert!(!case.skip);
    }

    #[test]
    fn unserializable_body_is_an_error() {
        let body: HashMap<(i32, i32), i32> = HashMap::from([((1, 2), 3)]);
        let result = CaseDefinition::new("TC_01", HttpMethod::Post, "/echo", 201).json_body(&body);
        assert!(matches!(result, Err(Error::Body(_))));
    }

    #[test]
    fn deserializes_with_defaults() {
        let case: CaseDefinition = serde_json::from_str(
            r#"{ "id": "TC_01", "endpoint": "/hello", "expected_status": 200 }"#,
        )
        .unwrap();

        assert_eq!(case.method, HttpMethod::Get);
        assert_eq!(case.case_type, CaseType::HappyPath);
        assert!(case.query.is_empty());
        assert!(case.body.is_none());
    }
}
