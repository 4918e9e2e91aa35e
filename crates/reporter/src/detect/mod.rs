// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pattern detectors.
//!
//! Each detector inspects a finished run, the project tree and build
//! telemetry, and returns at most one fact-based feedback record. Detectors
//! run in parallel; a detector that panics contributes nothing and does not
//! affect the others.

pub mod build_variance;
pub mod file_structure;
pub mod fixtures;
pub mod isolation;
pub mod mock_overuse;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde_json::Value;

use crate::build_metrics::BuildMetrics;
use crate::feedback::{Feedback, Severity};
use crate::model::RunSnapshot;
use crate::walker::{SourceAnalyzer, read_source};

pub use build_variance::BuildVarianceDetector;
pub use file_structure::FileStructureAnalyzer;
pub use fixtures::TestFixturesOpportunityDetector;
pub use isolation::MissingIsolationDetector;
pub use mock_overuse::MockOveruseDetector;

/// A fact-based pattern detector.
pub trait Detector: Send + Sync {
    /// Unique category of the feedback this detector produces.
    fn category(&self) -> &'static str;

    /// Inspect a run. `None` means nothing to report.
    fn detect(&self, snapshot: &RunSnapshot, root: &Path, metrics: &BuildMetrics)
    -> Option<Feedback>;
}

/// An ordered set of detectors.
pub struct Pipeline {
    detectors: Vec<Box<dyn Detector>>,
}

impl Pipeline {
    pub fn new(detectors: Vec<Box<dyn Detector>>) -> Self {
        Self { detectors }
    }

    /// The five built-in detectors, in reporting order.
    pub fn standard(analyzer: SourceAnalyzer) -> Self {
        Self::new(vec![
            Box::new(MockOveruseDetector::new(analyzer.clone())),
            Box::new(TestFixturesOpportunityDetector::new(analyzer.clone())),
            Box::new(MissingIsolationDetector::new(analyzer.clone())),
            Box::new(BuildVarianceDetector),
            Box::new(FileStructureAnalyzer::new(analyzer)),
        ])
    }

    pub fn categories(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.category()).collect()
    }

    /// Run every detector and collect feedback in registration order.
    pub fn run(
        &self,
        snapshot: &RunSnapshot,
        root: &Path,
        metrics: &BuildMetrics,
    ) -> Vec<Feedback> {
        let results: Vec<Option<Feedback>> = self
            .detectors
            .par_iter()
            .map(|detector| {
                match catch_unwind(AssertUnwindSafe(|| detector.detect(snapshot, root, metrics))) {
                    Ok(feedback) => feedback,
                    Err(_) => {
                        tracing::error!("detector {} panicked; skipping", detector.category());
                        None
                    }
                }
            })
            .collect();

        results.into_iter().flatten().collect()
    }
}

/// Build a feedback record, logging and dropping it when invalid.
pub(crate) fn feedback(
    category: &'static str,
    severity: Severity,
    title: &str,
    evidence: Value,
    message: String,
    recommendation: String,
) -> Option<Feedback> {
    Feedback::new(category, severity, title, evidence, message, recommendation)
        .inspect_err(|e| tracing::error!("{category}: discarding feedback: {e}"))
        .ok()
}

/// Read each file, skipping unreadable ones.
pub(crate) fn read_all(files: Vec<PathBuf>) -> Vec<(PathBuf, String)> {
    files
        .into_iter()
        .filter_map(|path| read_source(&path).map(|content| (path, content)))
        .collect()
}
