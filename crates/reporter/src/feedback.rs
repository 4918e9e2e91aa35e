// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Detector feedback records.
//!
//! Feedback carries measured evidence only. Construction validates the
//! category, severity and evidence shape and fails fast: an invalid record
//! is a bug in the detector that built it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[cfg(test)]
#[path = "feedback_tests.rs"]
mod tests;

/// Errors raised when building a feedback record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedbackError {
    #[error("category cannot be empty")]
    EmptyCategory,

    #[error("invalid severity: {0}. Must be one of: info, warning")]
    InvalidSeverity(String),

    #[error("evidence must be a JSON object, got {0}")]
    InvalidEvidence(&'static str),
}

/// Feedback severity. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            other => Err(FeedbackError::InvalidSeverity(other.to_string())),
        }
    }
}

/// One detector's evidence-backed observation about the test suite.
///
/// Fields are private so every record, including one read back from a
/// report, passes the checks in [`Feedback::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFeedback")]
pub struct Feedback {
    category: String,
    severity: Severity,
    title: String,
    evidence: Map<String, Value>,
    message: String,
    recommendation: String,
}

/// Unchecked wire form of [`Feedback`].
#[derive(Deserialize)]
struct RawFeedback {
    category: String,
    severity: Severity,
    title: String,
    evidence: Value,
    message: String,
    recommendation: String,
}

impl TryFrom<RawFeedback> for Feedback {
    type Error = FeedbackError;

    fn try_from(raw: RawFeedback) -> Result<Self, Self::Error> {
        Self::new(
            raw.category,
            raw.severity,
            raw.title,
            raw.evidence,
            raw.message,
            raw.recommendation,
        )
    }
}

impl Feedback {
    /// Build a validated feedback record. `evidence` must be a JSON object.
    pub fn new(
        category: impl Into<String>,
        severity: Severity,
        title: impl Into<String>,
        evidence: Value,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Result<Self, FeedbackError> {
        let category = category.into();
        if category.trim().is_empty() {
            return Err(FeedbackError::EmptyCategory);
        }

        let evidence = match evidence {
            Value::Object(map) => map,
            other => return Err(FeedbackError::InvalidEvidence(json_kind(&other))),
        };

        Ok(Self {
            category,
            severity,
            title: title.into(),
            evidence,
            message: message.into(),
            recommendation: recommendation.into(),
        })
    }

    /// Like [`Feedback::new`] with the severity given as text.
    pub fn parse(
        category: impl Into<String>,
        severity: &str,
        title: impl Into<String>,
        evidence: Value,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Result<Self, FeedbackError> {
        let severity = severity.parse()?;
        Self::new(category, severity, title, evidence, message, recommendation)
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Measurements backing the observation, keyed by evidence name.
    pub fn evidence(&self) -> &Map<String, Value> {
        &self.evidence
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn recommendation(&self) -> &str {
        &self.recommendation
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
