#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

#[test]
fn empty_metrics_are_zeroed() {
    let metrics = BuildMetrics::empty();
    assert_eq!(metrics.compilation_ms(), 0);
    assert!(!metrics.incremental_enabled());
    assert!(metrics.history().is_empty());
}

#[test]
fn with_history_keeps_order() {
    let metrics = BuildMetrics::with_history(vec![1000, 1500, 1200]).unwrap();
    assert_eq!(metrics.history(), &[1000, 1500, 1200]);
    assert_eq!(metrics.compilation_ms(), 0);
    assert!(!metrics.incremental_enabled());
}

#[test]
fn explicit_values_are_kept() {
    let metrics = BuildMetrics::new(2500, true, vec![]).unwrap();
    assert_eq!(metrics.compilation_ms(), 2500);
    assert!(metrics.incremental_enabled());
}

#[test]
fn negative_compilation_time_is_rejected() {
    assert_eq!(
        BuildMetrics::new(-1, false, vec![]).unwrap_err(),
        MetricsError::NegativeCompilationTime(-1)
    );
}

#[test]
fn negative_history_entry_is_rejected() {
    let err = BuildMetrics::with_history(vec![1000, -5, 900]).unwrap_err();
    assert_eq!(err, MetricsError::NegativeHistoryEntry(-5, 1));
}

#[test]
fn zero_durations_are_valid() {
    assert!(BuildMetrics::new(0, false, vec![0, 0]).is_ok());
}

#[test]
fn collect_without_telemetry_is_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    assert_eq!(BuildMetrics::collect(tmp.path()), BuildMetrics::empty());
}
