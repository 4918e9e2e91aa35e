// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Host engine lifecycle facade.
//!
//! The host calls these methods from any thread. When the reporter is
//! disabled every method returns immediately. When enabled, failures of any
//! kind are logged and swallowed: the host's test run never observes an
//! error from the reporter.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::build_metrics::BuildMetrics;
use crate::collector::{ExecutionResult, ResultCollector, TestIdentifier};
use crate::config::ReporterConfig;
use crate::detect::Pipeline;
use crate::walker::SourceAnalyzer;
use crate::writer::ResultWriter;

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;

/// Supplies build telemetry for a project root at the end of a run.
pub type MetricsSupplier = Box<dyn Fn(&Path) -> BuildMetrics + Send + Sync>;

pub struct Listener {
    config: ReporterConfig,
    pipeline: Pipeline,
    metrics: MetricsSupplier,
    /// Collector of the run in progress, if any.
    current: RwLock<Option<Arc<ResultCollector>>>,
}

impl Listener {
    pub fn new(config: ReporterConfig) -> Self {
        let pipeline = Pipeline::standard(SourceAnalyzer::new(config.source_dirs.clone()));
        Self {
            config,
            pipeline,
            metrics: Box::new(BuildMetrics::collect),
            current: RwLock::new(None),
        }
    }

    /// Listener configured from the process environment.
    pub fn from_env() -> Self {
        Self::new(ReporterConfig::from_env())
    }

    /// Replace the build telemetry source.
    pub fn with_build_metrics(
        mut self,
        supplier: impl Fn(&Path) -> BuildMetrics + Send + Sync + 'static,
    ) -> Self {
        self.metrics = Box::new(supplier);
        self
    }

    /// Replace the detector pipeline.
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Begin a run, discarding any unfinished one.
    pub fn on_run_start(&self) {
        if !self.config.enabled {
            return;
        }
        contained("run start", || {
            let collector =
                ResultCollector::new(&self.config.project_root, self.config.source_dirs.clone());
            let mut slot = self.current.write().unwrap_or_else(|p| p.into_inner());
            if slot.replace(Arc::new(collector)).is_some() {
                tracing::warn!("run started before the previous run finished; discarding it");
            }
            Ok(())
        });
    }

    pub fn on_test_start(&self, id: &TestIdentifier) {
        if !self.config.enabled {
            return;
        }
        contained("test start", || {
            if let Some(collector) = self.collector() {
                collector.record_start(id);
            }
            Ok(())
        });
    }

    pub fn on_test_finish(&self, id: &TestIdentifier, result: &ExecutionResult) {
        if !self.config.enabled {
            return;
        }
        contained("test finish", || {
            if let Some(collector) = self.collector() {
                collector.record_finish(id, result);
            }
            Ok(())
        });
    }

    pub fn on_test_skip(&self, id: &TestIdentifier, reason: &str) {
        if !self.config.enabled {
            return;
        }
        contained("test skip", || {
            if let Some(collector) = self.collector() {
                collector.record_skip(id, reason);
            }
            Ok(())
        });
    }

    /// End the run: detect patterns and write the result document.
    pub fn on_run_finish(&self) {
        if !self.config.enabled {
            return;
        }
        contained("run finish", || self.finish_run());
    }

    fn collector(&self) -> Option<Arc<ResultCollector>> {
        self.current.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    fn finish_run(&self) -> anyhow::Result<()> {
        let collector = self.current.write().unwrap_or_else(|p| p.into_inner()).take();
        let Some(collector) = collector else {
            tracing::debug!("run finished without a run start; nothing to write");
            return Ok(());
        };

        let root = &self.config.project_root;
        let snapshot = collector.snapshot();
        let metrics = (self.metrics)(root);
        let feedback = self.pipeline.run(&snapshot, root, &metrics);
        tracing::debug!(
            "run finished: {} tests, {} feedback records",
            snapshot.summary.total,
            feedback.len()
        );

        ResultWriter::write(&self.config.output_path(), &snapshot.with_feedback(feedback))
    }
}

/// Run a callback body, logging and suppressing errors and panics.
fn contained(event: &str, body: impl FnOnce() -> anyhow::Result<()>) {
    match catch_unwind(AssertUnwindSafe(body)) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("{event} failed: {e:#}"),
        Err(_) => tracing::error!("{event} panicked; event dropped"),
    }
}
