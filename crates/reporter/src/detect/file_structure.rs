// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test file structure analysis.
//!
//! Three checks, most severe first:
//! - test-named files under production source directories
//! - test classes whose package differs from the class they test
//! - classes with test annotations but no `Test` prefix or suffix

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use regex::Regex;
use serde::Serialize;
use serde_json::json;

use super::{Detector, feedback, read_all};
use crate::build_metrics::BuildMetrics;
use crate::feedback::{Feedback, Severity};
use crate::model::RunSnapshot;
use crate::walker::{SourceAnalyzer, class_name, read_source, relative_display};

#[cfg(test)]
#[path = "file_structure_tests.rs"]
mod tests;

const CATEGORY: &str = "file-structure";

/// File name fragments that mark a test source.
const TEST_NAME_MARKERS: &[&str] = &["Test", "Spec"];

const TEST_ANNOTATIONS: &[&str] = &["@Test", "@org.junit.Test", "@org.junit.jupiter.api.Test"];

#[allow(clippy::expect_used)]
static PACKAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*package\s+([a-z][a-z0-9_.]*)\s*;?").expect("valid regex pattern")
});

#[allow(clippy::expect_used)]
static TEST_ANNOTATION: LazyLock<AhoCorasick> =
    LazyLock::new(|| AhoCorasick::new(TEST_ANNOTATIONS).expect("valid markers"));

/// A test class declared in a different package than its production class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageMismatch {
    pub test_class: String,
    pub test_package: String,
    pub expected_package: String,
}

/// Findings of one analysis.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StructureReport {
    pub tests_in_main: Vec<String>,
    pub package_mismatches: Vec<PackageMismatch>,
    pub naming_violations: Vec<String>,
}

impl StructureReport {
    pub fn is_empty(&self) -> bool {
        self.tests_in_main.is_empty()
            && self.package_mismatches.is_empty()
            && self.naming_violations.is_empty()
    }

    /// Title for the most severe kind of finding present.
    pub fn title(&self) -> &'static str {
        if !self.tests_in_main.is_empty() {
            "Tests Found in Production Code Directory"
        } else if !self.package_mismatches.is_empty() {
            "Package Structure Inconsistencies Detected"
        } else {
            "Test Naming Convention Violations Detected"
        }
    }

    fn message(&self) -> String {
        let mut sections = Vec::new();

        if !self.tests_in_main.is_empty() {
            let mut section = format!(
                "CRITICAL: Found {} test file(s) in production source directories:",
                self.tests_in_main.len()
            );
            for file in &self.tests_in_main {
                section.push_str(&format!("\n  - {file}"));
            }
            sections.push(section);
        }

        if !self.package_mismatches.is_empty() {
            let mut section = format!(
                "Found {} package structure mismatch(es):",
                self.package_mismatches.len()
            );
            for m in &self.package_mismatches {
                section.push_str(&format!(
                    "\n  - {}: package mismatch - test: '{}', production: '{}'",
                    m.test_class, m.test_package, m.expected_package
                ));
            }
            sections.push(section);
        }

        if !self.naming_violations.is_empty() {
            let mut section = format!(
                "Found {} naming convention violation(s):",
                self.naming_violations.len()
            );
            for violation in &self.naming_violations {
                section.push_str(&format!("\n  - {violation}"));
            }
            sections.push(section);
        }

        format!("File structure analysis found the following issues:\n\n{}", sections.join("\n\n"))
    }

    fn recommendation(&self) -> String {
        let mut parts = Vec::new();
        if !self.tests_in_main.is_empty() {
            parts.push(
                "Move test files from production source directories to test source \
                 directories. Test directories are excluded from production builds.",
            );
        }
        if !self.package_mismatches.is_empty() {
            parts.push(
                "Align test packages with the packages of the code under test. Mirrored \
                 packages keep navigation between tests and code consistent.",
            );
        }
        if !self.naming_violations.is_empty() {
            parts.push(
                "Name test classes with a 'Test' suffix or prefix. Build tools and readers \
                 recognize test files by this convention.",
            );
        }
        parts.join(" ")
    }
}

pub struct FileStructureAnalyzer {
    analyzer: SourceAnalyzer,
}

impl FileStructureAnalyzer {
    pub fn new(analyzer: SourceAnalyzer) -> Self {
        Self { analyzer }
    }

    /// Run all three checks over the tree at `root`.
    pub fn analyze(&self, root: &Path) -> StructureReport {
        let main_files = self.analyzer.find_main_files(root);
        let test_sources = read_all(self.analyzer.find_test_files(root));

        StructureReport {
            tests_in_main: tests_in_main(root, &main_files),
            package_mismatches: package_mismatches(&test_sources, &main_files),
            naming_violations: naming_violations(root, &test_sources),
        }
    }
}

impl Detector for FileStructureAnalyzer {
    fn category(&self) -> &'static str {
        CATEGORY
    }

    fn detect(
        &self,
        snapshot: &RunSnapshot,
        root: &Path,
        _metrics: &BuildMetrics,
    ) -> Option<Feedback> {
        if snapshot.summary.total == 0 {
            return None;
        }

        let report = self.analyze(root);
        if report.is_empty() {
            return None;
        }

        feedback(
            CATEGORY,
            Severity::Warning,
            report.title(),
            json!({
                "testsInMain": report.tests_in_main,
                "packageMismatches": report.package_mismatches,
                "namingViolations": report.naming_violations,
            }),
            report.message(),
            report.recommendation(),
        )
    }
}

fn tests_in_main(root: &Path, main_files: &[PathBuf]) -> Vec<String> {
    main_files
        .iter()
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| TEST_NAME_MARKERS.iter().any(|m| name.contains(m)))
        })
        .map(|path| relative_display(root, path))
        .collect()
}

fn package_mismatches(
    test_sources: &[(PathBuf, String)],
    main_files: &[PathBuf],
) -> Vec<PackageMismatch> {
    // First production file per class name; inputs are sorted.
    let mut by_class: HashMap<&str, &Path> = HashMap::new();
    for path in main_files {
        if let Some(name) = class_name(path) {
            by_class.entry(name).or_insert(path);
        }
    }

    let mut mismatches = Vec::new();
    for (path, content) in test_sources {
        let (Some(test_class), Some(test_package)) = (class_name(path), package_of(content))
        else {
            continue;
        };
        let production = production_class(test_class);
        if production == test_class || production.is_empty() {
            continue;
        }
        let Some(expected) = by_class
            .get(production.as_str())
            .and_then(|p| read_source(p))
            .and_then(|c| package_of(&c).map(str::to_string))
        else {
            continue;
        };
        if expected != test_package {
            mismatches.push(PackageMismatch {
                test_class: test_class.to_string(),
                test_package: test_package.to_string(),
                expected_package: expected,
            });
        }
    }
    mismatches
}

fn naming_violations(root: &Path, test_sources: &[(PathBuf, String)]) -> Vec<String> {
    test_sources
        .iter()
        .filter(|(_, content)| TEST_ANNOTATION.is_match(content))
        .filter_map(|(path, _)| {
            let name = class_name(path)?;
            let named_as_test = name.starts_with("Test") || name.ends_with("Test");
            (!named_as_test).then(|| {
                format!(
                    "{}: Class '{}' contains test methods but lacks Test suffix or Test prefix",
                    relative_display(root, path),
                    name
                )
            })
        })
        .collect()
}

/// Declared package of a source file.
pub fn package_of(content: &str) -> Option<&str> {
    PACKAGE.captures(content).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

/// `OrderServiceTest` -> `OrderService`, `TestOrderService` -> `OrderService`.
pub fn production_class(test_class: &str) -> String {
    test_class.replace("Test", "")
}
