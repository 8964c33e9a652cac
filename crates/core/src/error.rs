//! Validation error types
//!
//! Schema validation never stops at the first problem: every violated field is
//! collected so a caller can fix a document in one pass.

use serde::Serialize;
use thiserror::Error;

/// A single field that failed schema validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Dotted/indexed path to the field, e.g. `apis[0].endpoints[1].method`
    pub path: String,
    /// Expected type, enum, or cardinality
    pub expected: String,
    /// What was actually present
    pub found: String,
}

impl FieldViolation {
    pub fn new(path: impl Into<String>, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = if self.path.is_empty() { "(root)" } else { &self.path };
        write!(f, "{}: expected {}, found {}", path, self.expected, self.found)
    }
}

/// Input failed schema validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed: {}", format_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Single-violation error
    pub fn single(path: impl Into<String>, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::new(vec![FieldViolation::new(path, expected, found)])
    }

    /// Paths of every violated field
    pub fn paths(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.path.as_str()).collect()
    }

    /// Whether a violation was recorded at exactly this path
    pub fn has_path(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
