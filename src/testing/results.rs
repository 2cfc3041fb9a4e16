use std::time::Duration;

use crate::http::response::ObservedResponse;
use crate::testing::case::CaseDefinition;

/// Observed outcome of executing one case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRecord {
    pub response: ObservedResponse,
    pub elapsed: Duration,
    pub case: CaseDefinition,
}

impl ResultRecord {
    pub fn new(case: CaseDefinition, response: ObservedResponse, elapsed: Duration) -> Self {
        Self {
            response,
            elapsed,
            case,
        }
    }

    /// A record with nothing observed. It carries no result and is never
    /// analyzed or counted.
    pub fn is_empty(&self) -> bool {
        self.response.is_empty() && self.elapsed.is_zero()
    }
}

/// Append-only sequence of results in execution order.
#[derive(Debug, Clone, Default)]
pub struct ResultSequence {
    records: Vec<ResultRecord>,
}

impl ResultSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `record` after the current tail. Records of skipped cases are
    /// dropped. Returns whether the record was stored.
    pub fn append(&mut self, record: ResultRecord) -> bool {
        if record.case.skip {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Records in insertion order. Each call starts from the head.
    pub fn iter(&self) -> std::slice::Iter<'_, ResultRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a ResultSequence {
    type Item = &'a ResultRecord;
    type IntoIter = std::slice::Iter<'a, ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
