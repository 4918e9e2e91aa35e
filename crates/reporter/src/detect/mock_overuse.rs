// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mock overuse detection.
//!
//! Counts mock declarations in test sources against the number of executed
//! tests and flags mocked value objects.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use super::{Detector, feedback, read_all};
use crate::build_metrics::BuildMetrics;
use crate::config::defaults::thresholds;
use crate::feedback::{Feedback, Severity};
use crate::model::RunSnapshot;
use crate::walker::{SourceAnalyzer, relative_display};

#[cfg(test)]
#[path = "mock_overuse_tests.rs"]
mod tests;

const CATEGORY: &str = "mock-overuse";

/// `@Mock`, `@MockBean` and `mock(` occurrences.
#[allow(clippy::expect_used)]
static MOCK_USAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@Mock(?:Bean)?\b|\bmock\(").expect("valid regex pattern")
});

/// Type of an annotated mock field: `@Mock private OrderService service`.
#[allow(clippy::expect_used)]
static MOCK_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@Mock(?:Bean)?\s+(?:private\s+)?([A-Z][A-Za-z0-9_]*)\s+")
        .expect("valid regex pattern")
});

/// Type passed to `mock(Type.class)`.
#[allow(clippy::expect_used)]
static MOCK_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"mock\(([A-Z][A-Za-z0-9_]*)\.class").expect("valid regex pattern")
});

#[allow(clippy::expect_used)]
static SINGLE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+$").expect("valid regex pattern"));

const VALUE_OBJECT_NAMES: &[&str] = &["Money", "Amount", "Email", "Address"];

pub struct MockOveruseDetector {
    analyzer: SourceAnalyzer,
}

impl MockOveruseDetector {
    pub fn new(analyzer: SourceAnalyzer) -> Self {
        Self { analyzer }
    }
}

impl Detector for MockOveruseDetector {
    fn category(&self) -> &'static str {
        CATEGORY
    }

    fn detect(
        &self,
        snapshot: &RunSnapshot,
        root: &Path,
        _metrics: &BuildMetrics,
    ) -> Option<Feedback> {
        let test_count = snapshot.summary.total;
        if test_count == 0 {
            return None;
        }

        let mut mock_count = 0usize;
        let mut value_objects: Vec<String> = Vec::new();
        let mut example_file: Option<String> = None;

        for (path, content) in read_all(self.analyzer.find_test_files(root)) {
            mock_count += MOCK_USAGE.find_iter(&content).count();

            for ty in mocked_types(&content) {
                if !is_value_object(ty) {
                    continue;
                }
                if !value_objects.iter().any(|seen| seen == ty) {
                    value_objects.push(ty.to_string());
                }
                if example_file.is_none() {
                    example_file = Some(relative_display(root, &path));
                }
            }
        }

        let ratio = mock_count as f64 / test_count as f64;
        if ratio <= thresholds::MOCK_RATIO && value_objects.is_empty() {
            return None;
        }

        let mut message = format!(
            "This test suite uses {mock_count} mocks across {test_count} tests ({ratio:.2} mocks per test). "
        );
        if !value_objects.is_empty() {
            message.push_str(&format!("Value objects mocked: {}. ", value_objects.join(", ")));
        }
        message.push_str(
            "Real instances replace value object mocks; test fixtures cover complex dependency graphs.",
        );

        feedback(
            CATEGORY,
            Severity::Warning,
            "High mock usage detected",
            json!({
                "mockCount": mock_count,
                "testCount": test_count,
                "ratio": format!("{ratio:.2}"),
                "valueObjectMocks": value_objects,
                "exampleFile": example_file,
            }),
            message,
            "Replace value object mocks with real instances. \
             For complex dependency setup, build shared test fixtures."
                .to_string(),
        )
    }
}

/// Mocked type names in declaration order.
fn mocked_types(content: &str) -> Vec<&str> {
    let fields = MOCK_FIELD.captures_iter(content);
    let calls = MOCK_CALL.captures_iter(content);
    fields
        .chain(calls)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Name heuristic for small immutable data holders.
pub fn is_value_object(type_name: &str) -> bool {
    type_name.ends_with("Id")
        || type_name.ends_with("Value")
        || VALUE_OBJECT_NAMES.contains(&type_name)
        || SINGLE_WORD.is_match(type_name)
}
