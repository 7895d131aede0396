use serde::Serialize;
use std::fmt;

use crate::rules::{ErrorKind, RuleError};

use super::Strategy;

/// Outcome of applying rule sets to one document.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Whether every selected rule set accepted the data
    pub passed: bool,

    /// Strategy the sets were applied with
    pub strategy: Strategy,

    /// Names of the selected rule sets
    pub sets: Vec<String>,

    /// Failure details, when the data was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ReportError>,
}

/// Serializable view of a [`RuleError`].
#[derive(Debug, Clone, Serialize)]
pub struct ReportError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_rules: Vec<String>,
}

impl Report {
    /// Build a report from the result of an apply call.
    pub fn new(sets: Vec<String>, strategy: Strategy, result: &Result<(), RuleError>) -> Self {
        let error = result.as_ref().err().map(|err| ReportError {
            kind: err.kind(),
            message: err.to_string(),
            failed_rules: err.failed_rules().into_iter().map(str::to_string).collect(),
        });

        Report {
            passed: error.is_none(),
            strategy,
            sets,
            error,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            None => write!(f, "PASS ({} rule sets, {})", self.sets.len(), self.strategy),
            Some(err) => write!(f, "FAIL [{}]: {}", err.kind, err.message),
        }
    }
}
