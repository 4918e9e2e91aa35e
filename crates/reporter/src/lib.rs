// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test-run telemetry for TDD Guard.
//!
//! Captures lifecycle events from a host test engine, aggregates them into a
//! run snapshot, runs fact-based pattern detectors over the test sources and
//! writes `.claude/tdd-guard/data/test.json` atomically.

pub mod build_metrics;
pub mod collector;
pub mod config;
pub mod detect;
pub mod events;
pub mod feedback;
pub mod listener;
pub mod model;
pub mod source_dirs;
pub mod walker;
pub mod writer;

#[cfg(test)]
pub mod test_utils;

pub use build_metrics::{BuildMetrics, MetricsError};
pub use collector::{
    ErrorInfo, ExecutionResult, ExecutionStatus, ResultCollector, TestIdentifier, TestSource,
};
pub use config::{ConfigSource, EnvSource, MapSource, ReporterConfig};
pub use detect::{Detector, Pipeline};
pub use feedback::{Feedback, FeedbackError, Severity};
pub use listener::Listener;
pub use model::{Failure, RunSnapshot, Summary, TestOutcome, TestStatus};
pub use source_dirs::{SourceDirectoryConfig, SourceDirectoryResolver};
pub use walker::SourceAnalyzer;
pub use writer::{ResultWriter, TestReport};
