// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Build and compilation metrics.
//!
//! Values are supplied by external build introspection; this type only
//! validates and carries them.

use std::path::Path;

use thiserror::Error;

#[cfg(test)]
#[path = "build_metrics_tests.rs"]
mod tests;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetricsError {
    #[error("compilation time cannot be negative: {0}ms")]
    NegativeCompilationTime(i64),

    #[error("build time history cannot contain negative durations: {0}ms at index {1}")]
    NegativeHistoryEntry(i64, usize),
}

/// Immutable build telemetry for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildMetrics {
    compilation_ms: i64,
    incremental_enabled: bool,
    history: Vec<i64>,
}

impl BuildMetrics {
    pub fn new(
        compilation_ms: i64,
        incremental_enabled: bool,
        history: Vec<i64>,
    ) -> Result<Self, MetricsError> {
        if compilation_ms < 0 {
            return Err(MetricsError::NegativeCompilationTime(compilation_ms));
        }
        if let Some((index, &ms)) = history.iter().enumerate().find(|(_, ms)| **ms < 0) {
            return Err(MetricsError::NegativeHistoryEntry(ms, index));
        }
        Ok(Self { compilation_ms, incremental_enabled, history })
    }

    /// Zero duration, incremental compilation off, no history.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Only a build duration history (oldest first).
    pub fn with_history(history: Vec<i64>) -> Result<Self, MetricsError> {
        Self::new(0, false, history)
    }

    /// Collect metrics for the project at `root`.
    ///
    /// Build tools report nothing to this process yet, so this yields
    /// [`BuildMetrics::empty`].
    pub fn collect(root: &Path) -> Self {
        tracing::debug!("no build telemetry available for {}", root.display());
        Self::empty()
    }

    /// Test compilation time in milliseconds.
    pub fn compilation_ms(&self) -> i64 {
        self.compilation_ms
    }

    pub fn incremental_enabled(&self) -> bool {
        self.incremental_enabled
    }

    /// Recent build durations in milliseconds.
    pub fn history(&self) -> &[i64] {
        &self.history
    }
}
