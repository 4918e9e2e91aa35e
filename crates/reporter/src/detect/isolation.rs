// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Missing isolation detection.
//!
//! Flags hardcoded URLs, absolute file paths and port numbers in test
//! sources. Each is a dependency on the environment the test runs in.

use std::fmt;
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
#[path = "isolation_tests.rs"]
mod tests;

const CATEGORY: &str = "missing-isolation";

/// Numeric literals counted as ports: `1024 <= n < 2100`.
const PORT_RANGE: std::ops::Range<u32> = 1024..2100;

#[allow(clippy::expect_used)]
static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[a-zA-Z0-9.-]+(?::[0-9]+)?(?:/[^\s"')*]*)?"#)
        .expect("valid regex pattern")
});

/// Quoted absolute path, Unix or Windows.
#[allow(clippy::expect_used)]
static FILE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["'](/[a-zA-Z0-9_./]+|[A-Z]:\\[a-zA-Z0-9_\\]+)["']"#)
        .expect("valid regex pattern")
});

#[allow(clippy::expect_used)]
static PORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]{4,5})\b").expect("valid regex pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Url,
    FilePath,
    Port,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResourceKind::Url => "URL",
            ResourceKind::FilePath => "FilePath",
            ResourceKind::Port => "Port",
        })
    }
}

/// One hardcoded resource found in a test file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hardcoded {
    pub kind: ResourceKind,
    pub value: String,
    pub file: String,
}

impl fmt::Display for Hardcoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} in {}", self.kind, self.value, self.file)
    }
}

pub struct MissingIsolationDetector {
    analyzer: SourceAnalyzer,
}

impl MissingIsolationDetector {
    pub fn new(analyzer: SourceAnalyzer) -> Self {
        Self { analyzer }
    }
}

impl Detector for MissingIsolationDetector {
    fn category(&self) -> &'static str {
        CATEGORY
    }

    fn detect(
        &self,
        _snapshot: &RunSnapshot,
        root: &Path,
        _metrics: &BuildMetrics,
    ) -> Option<Feedback> {
        let files = self.analyzer.find_test_files(root);
        if files.is_empty() {
            return None;
        }

        let found: Vec<Hardcoded> = read_all(files)
            .into_iter()
            .flat_map(|(path, content)| scan(&content, &relative_display(root, &path)))
            .collect();
        if found.is_empty() {
            return None;
        }

        let examples: Vec<String> =
            found.iter().take(thresholds::ISOLATION_EXAMPLES).map(ToString::to_string).collect();

        feedback(
            CATEGORY,
            Severity::Warning,
            "Tests depend on external resources",
            json!({
                "hardcodedCount": found.len(),
                "examples": examples,
            }),
            format!(
                "Found {} hardcoded URLs, file paths or ports in test code. \
                 Each one ties a test to the machine it runs on.",
                found.len()
            ),
            "Inject test doubles or temporary resources instead of hardcoding external \
             locations. Injected resources keep tests isolated and repeatable."
                .to_string(),
        )
    }
}

/// Hardcoded resources in one file: URLs, then paths, then ports.
pub fn scan(content: &str, file: &str) -> Vec<Hardcoded> {
    let entry = |kind, value: &str| Hardcoded {
        kind,
        value: value.to_string(),
        file: file.to_string(),
    };

    let urls = URL.find_iter(content).map(|m| entry(ResourceKind::Url, m.as_str()));

    let paths = FILE_PATH
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|path| !path.contains("test") && !path.contains("resources"))
        .map(|path| entry(ResourceKind::FilePath, path));

    let ports = PORT
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .filter(|port| PORT_RANGE.contains(port))
        .map(|port| entry(ResourceKind::Port, &port.to_string()));

    urls.chain(paths).chain(ports).collect()
}
