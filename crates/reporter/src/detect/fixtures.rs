// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test fixture opportunity detection.
//!
//! A file's constructor depth is the largest argument count of any
//! `new Type(...)` expression in it. High average depth or slow test
//! compilation point at object graphs rebuilt in every test.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use super::{Detector, feedback, read_all};
use crate::build_metrics::BuildMetrics;
use crate::config::defaults::thresholds;
use crate::feedback::{Feedback, Severity};
use crate::model::RunSnapshot;
use crate::walker::SourceAnalyzer;

#[cfg(test)]
#[path = "fixtures_tests.rs"]
mod tests;

const CATEGORY: &str = "test-fixtures-opportunity";

/// `new Type(` up to and including the opening parenthesis.
#[allow(clippy::expect_used)]
static CONSTRUCTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bnew\s+[A-Z][A-Za-z0-9_]*\s*\(").expect("valid regex pattern")
});

pub struct TestFixturesOpportunityDetector {
    analyzer: SourceAnalyzer,
}

impl TestFixturesOpportunityDetector {
    pub fn new(analyzer: SourceAnalyzer) -> Self {
        Self { analyzer }
    }
}

impl Detector for TestFixturesOpportunityDetector {
    fn category(&self) -> &'static str {
        CATEGORY
    }

    fn detect(
        &self,
        _snapshot: &RunSnapshot,
        root: &Path,
        metrics: &BuildMetrics,
    ) -> Option<Feedback> {
        let files = self.analyzer.find_test_files(root);
        if files.is_empty() {
            return None;
        }

        let depths: Vec<usize> =
            read_all(files).iter().map(|(_, content)| constructor_depth(content)).collect();
        let avg_depth = if depths.is_empty() {
            0.0
        } else {
            depths.iter().sum::<usize>() as f64 / depths.len() as f64
        };

        let compilation_ms = metrics.compilation_ms();
        if compilation_ms <= thresholds::COMPILATION_MS && avg_depth <= thresholds::DEPENDENCY_DEPTH
        {
            return None;
        }

        feedback(
            CATEGORY,
            Severity::Info,
            "Test fixture opportunity detected",
            json!({
                "compilationMs": compilation_ms,
                "avgDepth": format!("{avg_depth:.1}"),
            }),
            format!(
                "Test compilation took {compilation_ms}ms with an average constructor depth of \
                 {avg_depth:.1} arguments. Shared test fixtures build dependency graphs once \
                 instead of in every test."
            ),
            "Move repeated construction of complex objects into shared test fixtures or \
             builders reused across test classes."
                .to_string(),
        )
    }
}

/// Largest top-level argument count of any constructor call in `content`.
pub fn constructor_depth(content: &str) -> usize {
    CONSTRUCTOR
        .find_iter(content)
        .map(|m| count_arguments(&content[m.end()..]))
        .max()
        .unwrap_or(0)
}

/// Count top-level arguments in `rest`, which starts just after an opening
/// parenthesis. Nested parentheses and string literals are skipped. An
/// unterminated list counts what it has seen.
pub fn count_arguments(rest: &str) -> usize {
    let mut depth = 0usize;
    let mut commas = 0usize;
    let mut seen_content = false;
    let mut in_string: Option<char> = None;
    let mut escaped = false;

    for c in rest.chars() {
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                in_string = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => {
                in_string = Some(c);
                seen_content = true;
            }
            '(' | '[' | '{' => {
                depth += 1;
                seen_content = true;
            }
            ')' | ']' | '}' if depth > 0 => depth -= 1,
            ')' => break,
            ',' if depth == 0 => commas += 1,
            c if !c.is_whitespace() => seen_content = true,
            _ => {}
        }
    }

    if seen_content { commas + 1 } else { 0 }
}
