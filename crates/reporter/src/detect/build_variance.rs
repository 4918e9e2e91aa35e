// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Build time variance detection.
//!
//! Incremental builds of an unchanged project take roughly the same time.
//! Large swings in the recorded history mean work is being redone.

use std::path::Path;
use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use serde_json::json;

use super::{Detector, feedback};
use crate::build_metrics::BuildMetrics;
use crate::config::defaults::{paths, thresholds};
use crate::feedback::{Feedback, Severity};
use crate::model::RunSnapshot;
use crate::walker::read_source;

#[cfg(test)]
#[path = "build_variance_tests.rs"]
mod tests;

const CATEGORY: &str = "gradle-incremental-compilation";

const GRADLE_PROPERTIES: &str = "gradle.properties";
const CACHING_ON: &str = "org.gradle.caching=true";
const CACHING_OFF: &str = "org.gradle.caching=false";

/// Dependency markers and the annotation processor each one brings in.
const PROCESSORS: &[(&str, &str)] = &[
    ("lombok", "Lombok"),
    ("mapstruct", "MapStruct"),
    ("jpa-modelgen", "JPA Metamodel"),
    ("querydsl", "QueryDSL"),
];

#[allow(clippy::expect_used)]
static PROCESSOR_MARKERS: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasick::new(PROCESSORS.iter().map(|(marker, _)| marker)).expect("valid markers")
});

pub struct BuildVarianceDetector;

impl Detector for BuildVarianceDetector {
    fn category(&self) -> &'static str {
        CATEGORY
    }

    fn detect(
        &self,
        _snapshot: &RunSnapshot,
        root: &Path,
        metrics: &BuildMetrics,
    ) -> Option<Feedback> {
        let history = metrics.history();
        if history.len() < thresholds::MIN_BUILD_HISTORY {
            return None;
        }

        let variance = variance_percent(history)?;
        if variance <= thresholds::BUILD_VARIANCE_PERCENT {
            return None;
        }

        let incremental = caching_enabled(root);
        let processors = annotation_processors(root);

        let processor_list =
            if processors.is_empty() { "none".to_string() } else { processors.join(", ") };
        let message = format!(
            "Build time variance: {variance:.1}% over {} builds (incremental builds typically \
             stay under 10%). Incremental compilation enabled: {incremental}. Annotation \
             processors detected: {processor_list}. High variance indicates builds that \
             recompile unchanged sources.",
            history.len()
        );

        feedback(
            CATEGORY,
            Severity::Info,
            "Gradle incremental compilation issue detected",
            json!({
                "variancePercent": format!("{variance:.1}"),
                "incrementalEnabled": incremental,
                "annotationProcessors": processors,
                "buildTimes": history,
            }),
            message,
            recommendation(incremental, &processors),
        )
    }
}

/// Largest absolute deviation from the mean, as a percentage of the mean.
///
/// `None` for an empty history or a non-positive mean.
pub fn variance_percent(history: &[i64]) -> Option<f64> {
    if history.is_empty() {
        return None;
    }
    let mean = history.iter().map(|&t| t as f64).sum::<f64>() / history.len() as f64;
    if mean <= 0.0 {
        return None;
    }
    let max_deviation = history.iter().map(|&t| (t as f64 - mean).abs()).fold(0.0, f64::max);
    Some(max_deviation / mean * 100.0)
}

/// Whether `gradle.properties` turns the build cache on and never off.
pub fn caching_enabled(root: &Path) -> bool {
    let path = root.join(GRADLE_PROPERTIES);
    if !path.exists() {
        return false;
    }
    read_source(&path)
        .is_some_and(|content| content.contains(CACHING_ON) && !content.contains(CACHING_OFF))
}

/// Annotation processors declared in the first build file found, in a fixed order.
pub fn annotation_processors(root: &Path) -> Vec<&'static str> {
    let Some(build_file) =
        paths::BUILD_FILES.iter().map(|name| root.join(name)).find(|path| path.exists())
    else {
        return Vec::new();
    };
    let Some(content) = read_source(&build_file) else {
        return Vec::new();
    };

    let mut found = [false; PROCESSORS.len()];
    for m in PROCESSOR_MARKERS.find_overlapping_iter(&content) {
        found[m.pattern().as_usize()] = true;
    }

    PROCESSORS
        .iter()
        .zip(found)
        .filter_map(|((_, label), hit)| hit.then_some(*label))
        .collect()
}

fn recommendation(incremental: bool, processors: &[&str]) -> String {
    let mut parts = Vec::new();
    if !incremental {
        parts.push(
            "Enable the Gradle build cache in gradle.properties:\n  org.gradle.caching=true\n  \
             org.gradle.parallel=true"
                .to_string(),
        );
    }
    if !processors.is_empty() {
        parts.push(format!(
            "Annotation processors detected: {}. Configure them as isolating annotation \
             processors to keep compilation incremental.",
            processors.join(", ")
        ));
    }
    if parts.is_empty() {
        parts.push(
            "Review build scripts for tasks that bypass incremental compilation, such as tasks \
             declaring inputs without up-to-date checks."
                .to_string(),
        );
    }
    parts.join("\n\n")
}
