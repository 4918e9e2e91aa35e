//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for driving the tddguard binary with event streams.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use predicates;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Returns a Command configured to run the tddguard binary with a clean environment.
pub fn tddguard_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tddguard"));
    for var in [
        "TDDGUARD_ENABLED",
        "TDDGUARD_PROJECT_ROOT",
        "TDDGUARD_TEST_SOURCE_DIRS",
        "TDDGUARD_MAIN_SOURCE_DIRS",
        "TDDGUARD_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// A temporary Gradle project.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn gradle() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("build.gradle"), "plugins { id 'java' }\n").unwrap();
        Self { dir }
    }

    /// Create the marker directory that enables reporting.
    pub fn with_marker(self) -> Self {
        std::fs::create_dir_all(self.dir.path().join(".claude/tdd-guard")).unwrap();
        self
    }

    pub fn file(self, path: &str, content: &str) -> Self {
        let full = self.dir.path().join(path);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(full, content).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn report_path(&self) -> PathBuf {
        self.path().join(".claude/tdd-guard/data/test.json")
    }

    pub fn report(&self) -> serde_json::Value {
        let content = std::fs::read_to_string(self.report_path()).expect("report should exist");
        serde_json::from_str(&content).expect("report should be JSON")
    }
}

/// JSON-lines event stream builder.
#[derive(Default)]
pub struct Events {
    lines: Vec<String>,
}

impl Events {
    pub fn run() -> Self {
        Self::default().raw(r#"{"event":"run_started"}"#)
    }

    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn passed(self, class: &str, method: &str) -> Self {
        self.finished(class, method, r#"{"status":"successful"}"#)
    }

    pub fn failed(self, class: &str, method: &str, message: &str) -> Self {
        let result = format!(
            r#"{{"status":"failed","error":{{"type_name":"AssertionFailedError","message":"{message}","trace":"at {class}.{method}"}}}}"#
        );
        self.finished(class, method, &result)
    }

    pub fn skipped(self, class: &str, method: &str) -> Self {
        let id = id(class, method);
        self.raw(&format!(r#"{{"event":"test_skipped","id":{id},"reason":"disabled"}}"#))
    }

    fn finished(self, class: &str, method: &str, result: &str) -> Self {
        let id = id(class, method);
        self.raw(&format!(r#"{{"event":"test_started","id":{id}}}"#))
            .raw(&format!(r#"{{"event":"test_finished","id":{id},"result":{result}}}"#))
    }

    pub fn finish(self) -> String {
        let mut lines = self.raw(r#"{"event":"run_finished"}"#).lines;
        lines.push(String::new());
        lines.join("\n")
    }
}

fn id(class: &str, method: &str) -> String {
    format!(
        r#"{{"unique_id":"[class:{class}]/[method:{method}()]","display_name":"{method}()","source":{{"kind":"method","class_name":"{class}","method_name":"{method}"}}}}"#
    )
}
