// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Result document persistence.
//!
//! `test.json` is replaced atomically: the document is written to a
//! temporary file in the target directory and renamed over the old one.
//! Readers see either the previous document or the new one, never a
//! partial write.

use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::config::defaults::FRAMEWORK;
use crate::feedback::Feedback;
use crate::model::{Failure, RunSnapshot, Summary, TestOutcome};

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;

/// The on-disk result document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestReport {
    pub framework: String,
    pub timestamp: DateTime<Utc>,
    /// Total run duration in milliseconds.
    pub duration: u64,
    pub summary: Summary,
    pub tests: Vec<TestOutcome>,
    pub failures: Vec<Failure>,
    /// Detector feedback; may be empty.
    #[serde(default)]
    pub educational: Vec<Feedback>,
}

impl TestReport {
    /// Document for `snapshot`, stamped now.
    pub fn from_snapshot(snapshot: &RunSnapshot) -> Self {
        Self {
            framework: FRAMEWORK.to_string(),
            timestamp: Utc::now(),
            duration: snapshot.duration,
            summary: snapshot.summary,
            tests: snapshot.tests.clone(),
            failures: snapshot.failures.clone(),
            educational: snapshot.feedback.clone(),
        }
    }

    /// Load a report, returning None if not found.
    pub fn load(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let report = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(Some(report))
    }
}

/// Writes result documents.
pub struct ResultWriter;

impl ResultWriter {
    /// Atomically replace `path` with the document for `snapshot`.
    ///
    /// Parent directories are created as needed. On error the temporary
    /// file is removed and any previous document is left untouched.
    pub fn write(path: &Path, snapshot: &RunSnapshot) -> anyhow::Result<()> {
        Self::write_report(path, &TestReport::from_snapshot(snapshot))
    }

    pub fn write_report(path: &Path, report: &TestReport) -> anyhow::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;

        let tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;

        let mut out = BufWriter::new(tmp);
        serde_json::to_writer_pretty(&mut out, report)?;
        out.write_all(b"\n")?;
        let tmp = out.into_inner().map_err(|e| e.into_error())?;
        tmp.as_file().sync_all()?;

        tmp.persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("failed to replace {}", path.display()))?;

        tracing::debug!("wrote {}", path.display());
        Ok(())
    }
}
