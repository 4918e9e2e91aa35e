// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run result types.
//!
//! Field names serialize to the TDD Guard `test.json` schema.

use serde::{Deserialize, Serialize};

use crate::feedback::Feedback;

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;

/// Final status of one test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
}

/// Recorded result of one executed test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestOutcome {
    /// Method name, or the display name when no method is known.
    pub name: String,
    /// Source file relative to the project root (best effort, may be empty).
    pub file: String,
    pub status: TestStatus,
    /// Duration in milliseconds.
    pub duration: u64,
    pub display_name: String,
}

/// Details of a failed test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub name: String,
    pub file: String,
    pub message: String,
    /// Captured trace text.
    pub stack: String,
}

/// Rollup counts; `total == passed + failed + skipped` by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Summary {
    pub fn from_outcomes(tests: &[TestOutcome]) -> Self {
        let count = |status: TestStatus| tests.iter().filter(|t| t.status == status).count();
        let passed = count(TestStatus::Passed);
        let failed = count(TestStatus::Failed);
        let skipped = count(TestStatus::Skipped);
        Self { total: passed + failed + skipped, passed, failed, skipped }
    }
}

/// Immutable aggregate of one test run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSnapshot {
    pub summary: Summary,
    pub tests: Vec<TestOutcome>,
    pub failures: Vec<Failure>,
    /// Total run duration in milliseconds.
    pub duration: u64,
    pub feedback: Vec<Feedback>,
}

impl RunSnapshot {
    pub fn new(tests: Vec<TestOutcome>, failures: Vec<Failure>, duration: u64) -> Self {
        Self { summary: Summary::from_outcomes(&tests), tests, failures, duration, feedback: Vec::new() }
    }

    /// Attach detector feedback.
    pub fn with_feedback(mut self, feedback: Vec<Feedback>) -> Self {
        self.feedback = feedback;
        self
    }
}
