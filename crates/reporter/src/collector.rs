// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test result collection.
//!
//! The collector is shared by every thread the host engine runs tests on.
//! Start times live in a concurrent map; outcomes and failures are
//! append-only lists read by copying. Counts are computed on demand and are
//! only guaranteed exact once the run has finished.

use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::config::defaults::source;
use crate::model::{Failure, RunSnapshot, Summary, TestOutcome, TestStatus};
use crate::source_dirs::SourceDirectoryConfig;

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;

/// Identifies a node in the host engine's test plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestIdentifier {
    /// Engine-wide unique id, the key for start times.
    pub unique_id: String,
    pub display_name: String,
    #[serde(default)]
    pub source: Option<TestSource>,
    /// False for containers (classes, suites), which are not recorded.
    #[serde(default = "default_is_test")]
    pub is_test: bool,
}

fn default_is_test() -> bool {
    true
}

impl TestIdentifier {
    /// A test method `method` declared in `class_name`.
    pub fn method(class_name: &str, method: &str) -> Self {
        Self {
            unique_id: format!("[class:{class_name}]/[method:{method}()]"),
            display_name: format!("{method}()"),
            source: Some(TestSource::Method {
                class_name: class_name.to_string(),
                method_name: method.to_string(),
            }),
            is_test: true,
        }
    }

    /// The container node for `class_name`.
    pub fn container(class_name: &str) -> Self {
        let simple = class_name.rsplit('.').next().unwrap_or(class_name);
        Self {
            unique_id: format!("[class:{class_name}]"),
            display_name: simple.to_string(),
            source: Some(TestSource::Class { class_name: class_name.to_string() }),
            is_test: false,
        }
    }
}

/// Where a test is declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TestSource {
    Method { class_name: String, method_name: String },
    Class { class_name: String },
}

/// Engine-level execution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Successful,
    Failed,
    Aborted,
}

impl ExecutionStatus {
    fn to_status(self) -> TestStatus {
        match self {
            ExecutionStatus::Successful => TestStatus::Passed,
            ExecutionStatus::Failed => TestStatus::Failed,
            ExecutionStatus::Aborted => TestStatus::Skipped,
        }
    }
}

/// Error raised by a test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Simple type name of the error, e.g. `AssertionFailedError`.
    pub type_name: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub trace: String,
}

/// Result reported by the engine when a test finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub status: ExecutionStatus,
    #[serde(default)]
    pub error: Option<ErrorInfo>,
}

impl ExecutionResult {
    pub fn successful() -> Self {
        Self { status: ExecutionStatus::Successful, error: None }
    }

    pub fn failed(error: ErrorInfo) -> Self {
        Self { status: ExecutionStatus::Failed, error: Some(error) }
    }

    pub fn aborted() -> Self {
        Self { status: ExecutionStatus::Aborted, error: None }
    }
}

/// Message recorded for a failure the engine reported without an error.
const FAILED_WITHOUT_ERROR: &str = "Test failed";

/// Accumulates lifecycle events for one run.
pub struct ResultCollector {
    project_root: PathBuf,
    dirs: SourceDirectoryConfig,
    started: Instant,
    start_times: DashMap<String, Instant>,
    tests: RwLock<Vec<TestOutcome>>,
    failures: RwLock<Vec<Failure>>,
}

impl ResultCollector {
    /// Start collecting a run now.
    pub fn new(project_root: impl Into<PathBuf>, dirs: SourceDirectoryConfig) -> Self {
        Self {
            project_root: project_root.into(),
            dirs,
            started: Instant::now(),
            start_times: DashMap::new(),
            tests: RwLock::new(Vec::new()),
            failures: RwLock::new(Vec::new()),
        }
    }

    pub fn record_start(&self, id: &TestIdentifier) {
        if !id.is_test {
            return;
        }
        self.start_times.insert(id.unique_id.clone(), Instant::now());
    }

    pub fn record_finish(&self, id: &TestIdentifier, result: &ExecutionResult) {
        if !id.is_test {
            return;
        }

        let now = Instant::now();
        let start = self.start_times.remove(&id.unique_id).map(|(_, t)| t).unwrap_or(now);
        let duration = elapsed_ms(start, now);

        let status = result.status.to_status();
        let file = self.resolve_file(id);
        let name = method_name(id);

        write_lock(&self.tests).push(TestOutcome {
            name: name.clone(),
            file: file.clone(),
            status,
            duration,
            display_name: id.display_name.clone(),
        });

        if status == TestStatus::Failed {
            let (message, stack) = match &result.error {
                Some(error) => (
                    error.message.clone().unwrap_or_else(|| error.type_name.clone()),
                    error.trace.clone(),
                ),
                None => (FAILED_WITHOUT_ERROR.to_string(), String::new()),
            };
            write_lock(&self.failures).push(Failure { name, file, message, stack });
        }
    }

    pub fn record_skip(&self, id: &TestIdentifier, reason: &str) {
        if !id.is_test {
            return;
        }
        tracing::debug!("skipped {}: {}", id.display_name, reason);

        let outcome = TestOutcome {
            name: method_name(id),
            file: self.resolve_file(id),
            status: TestStatus::Skipped,
            duration: 0,
            display_name: id.display_name.clone(),
        };
        write_lock(&self.tests).push(outcome);
    }

    /// Copy of the outcomes recorded so far.
    pub fn tests(&self) -> Vec<TestOutcome> {
        read_lock(&self.tests).clone()
    }

    /// Copy of the failures recorded so far.
    pub fn failures(&self) -> Vec<Failure> {
        read_lock(&self.failures).clone()
    }

    pub fn total_count(&self) -> usize {
        read_lock(&self.tests).len()
    }

    pub fn passed_count(&self) -> usize {
        self.count(TestStatus::Passed)
    }

    pub fn failed_count(&self) -> usize {
        self.count(TestStatus::Failed)
    }

    pub fn skipped_count(&self) -> usize {
        self.count(TestStatus::Skipped)
    }

    fn count(&self, status: TestStatus) -> usize {
        read_lock(&self.tests).iter().filter(|t| t.status == status).count()
    }

    /// Rollup of the current outcome list.
    pub fn summary(&self) -> Summary {
        Summary::from_outcomes(&read_lock(&self.tests))
    }

    /// Milliseconds since the collector was created.
    pub fn total_duration(&self) -> u64 {
        elapsed_ms(self.started, Instant::now())
    }

    /// Freeze the current state into a snapshot without feedback.
    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot::new(self.tests(), self.failures(), self.total_duration())
    }

    fn resolve_file(&self, id: &TestIdentifier) -> String {
        match &id.source {
            Some(TestSource::Method { class_name, .. }) | Some(TestSource::Class { class_name }) => {
                resolve_class_file(&self.project_root, &self.dirs, class_name)
            }
            None => String::new(),
        }
    }
}

fn method_name(id: &TestIdentifier) -> String {
    match &id.source {
        Some(TestSource::Method { method_name, .. }) => method_name.clone(),
        _ => id.display_name.clone(),
    }
}

fn elapsed_ms(start: Instant, now: Instant) -> u64 {
    u64::try_from(now.saturating_duration_since(start).as_millis()).unwrap_or(u64::MAX)
}

// A panic while holding a list lock must not stop collection for other threads.
fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Whether a fully qualified class name names a test class.
pub fn is_test_class(class_name: &str) -> bool {
    source::TEST_CLASS_SUFFIXES.iter().any(|suffix| class_name.ends_with(suffix))
}

/// `com.example.FooTest` -> `com/example/FooTest.java`. Nested classes map to
/// the file of their outermost class.
pub fn class_to_relative_path(class_name: &str) -> String {
    let outer = class_name.split('$').next().unwrap_or(class_name);
    format!("{}.{}", outer.replace('.', "/"), source::CLASS_FILE_EXTENSION)
}

/// Resolve a class to its source file, relative to `root`.
///
/// Tries each candidate directory in order and returns the first where the
/// file exists; otherwise returns the first candidate as a best guess.
pub fn resolve_class_file(root: &Path, dirs: &SourceDirectoryConfig, class_name: &str) -> String {
    let outer = class_name.split('$').next().unwrap_or(class_name);
    let relative = class_to_relative_path(outer);

    let candidates =
        if is_test_class(outer) { dirs.test_candidates() } else { dirs.main_candidates() };

    let joined = |dir: &str| format!("{}/{}", dir.trim_end_matches('/'), relative);

    if let Some(found) = candidates.iter().find(|dir| root.join(dir).join(&relative).exists()) {
        return joined(found.as_str());
    }

    match candidates.first() {
        Some(first) => joined(first.as_str()),
        None => relative,
    }
}
