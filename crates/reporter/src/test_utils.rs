//! Shared unit test utilities.
//!
//! Provides common helpers for unit tests in the reporter crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::Path;

use regex::Regex;
use tempfile::TempDir;

use crate::model::{RunSnapshot, Summary, TestOutcome, TestStatus};

/// Creates a temp directory laid out as a Gradle project.
pub fn temp_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("build.gradle"), "plugins { id 'java' }\n").unwrap();
    dir
}

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

/// A snapshot whose summary reports `passed` passing and `failed` failing tests.
pub fn snapshot_with(passed: usize, failed: usize) -> RunSnapshot {
    let mut tests = Vec::new();
    for i in 0..passed {
        tests.push(outcome(&format!("passes_{i}"), TestStatus::Passed));
    }
    for i in 0..failed {
        tests.push(outcome(&format!("fails_{i}"), TestStatus::Failed));
    }
    RunSnapshot { summary: Summary::from_outcomes(&tests), tests, ..RunSnapshot::default() }
}

pub fn outcome(name: &str, status: TestStatus) -> TestOutcome {
    TestOutcome {
        name: name.to_string(),
        file: "src/test/java/com/example/SampleTest.java".to_string(),
        status,
        duration: 5,
        display_name: format!("{name}()"),
    }
}

/// Speculative words that never appear in detector output.
pub const FORBIDDEN_WORDS: &[&str] = &["could", "can", "should", "will", "might", "may", "would"];

/// Returns every forbidden word found in `text` (whole words, any case).
pub fn speculative_words(text: &str) -> Vec<String> {
    let pattern = format!(r"(?i)\b({})\b", FORBIDDEN_WORDS.join("|"));
    let re = Regex::new(&pattern).unwrap();
    re.find_iter(text).map(|m| m.as_str().to_lowercase()).collect()
}

/// Panics when any user-facing text of `feedback` contains speculative words.
pub fn assert_fact_based(feedback: &crate::feedback::Feedback) {
    for (field, text) in [
        ("title", feedback.title()),
        ("message", feedback.message()),
        ("recommendation", feedback.recommendation()),
    ] {
        let found = speculative_words(text);
        assert!(
            found.is_empty(),
            "{} {} contains speculative words {:?}: {}",
            feedback.category(),
            field,
            found,
            text
        );
    }
}
