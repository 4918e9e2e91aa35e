// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized default values for configuration.
//!
//! All default values are documented here for easy reference.

/// Identifies this reporter in the `framework` field of the output.
pub const FRAMEWORK: &str = "junit5";

/// Environment variable names.
pub mod env {
    /// Enables the reporter when set to "true" (any case).
    pub const ENABLED: &str = "TDDGUARD_ENABLED";

    /// Overrides project root detection.
    pub const PROJECT_ROOT: &str = "TDDGUARD_PROJECT_ROOT";

    /// Comma-separated test source directories.
    pub const TEST_SOURCE_DIRS: &str = "TDDGUARD_TEST_SOURCE_DIRS";

    /// Comma-separated main source directories.
    pub const MAIN_SOURCE_DIRS: &str = "TDDGUARD_MAIN_SOURCE_DIRS";

    /// Tracing filter for the host adapter binary.
    pub const LOG: &str = "TDDGUARD_LOG";
}

/// Keys understood by explicit configuration sources.
pub mod keys {
    pub const ENABLED: &str = "enabled";
    pub const PROJECT_ROOT: &str = "project_root";
    pub const TEST_SOURCE_DIRS: &str = "test_source_dirs";
    pub const MAIN_SOURCE_DIRS: &str = "main_source_dirs";
}

/// Well-known paths relative to the project root.
pub mod paths {
    /// Presence of this directory enables the reporter.
    pub const MARKER_DIR: &str = ".claude/tdd-guard";

    /// Where the run report is written.
    pub const OUTPUT_FILE: &str = ".claude/tdd-guard/data/test.json";

    /// Files that identify a project root, in lookup order.
    pub const BUILD_FILES: &[&str] = &["build.gradle", "build.gradle.kts", "pom.xml"];

    /// Build output directories never scanned for sources.
    pub const OUTPUT_DIRS: &[&str] = &["build", "target"];
}

/// Conventional source layouts used when nothing is configured.
pub mod dirs {
    /// Candidate locations when resolving a test class to a file.
    pub const TEST: &[&str] = &["src/test/java", "src/test/kotlin"];

    /// Candidate locations when resolving a production class to a file.
    pub const MAIN: &[&str] = &["src/main/java", "src/main/kotlin"];

    /// Directories scanned for test sources.
    pub const TEST_SCAN: &[&str] = &["src/test/java", "src/test/kotlin", "src/test"];

    /// Directories scanned for production sources.
    pub const MAIN_SCAN: &[&str] = &["src/main/java", "src/main/kotlin", "src/main"];
}

/// Source files and class naming.
pub mod source {
    /// Extensions of recognized source files.
    pub const EXTENSIONS: &[&str] = &["java", "kt"];

    /// Extension used when mapping a class name to a file path.
    pub const CLASS_FILE_EXTENSION: &str = "java";

    /// Suffixes that mark a class as a test class.
    pub const TEST_CLASS_SUFFIXES: &[&str] = &["Test", "Tests"];
}

/// Detector trigger thresholds.
pub mod thresholds {
    /// Mocks per test above which mock overuse is reported.
    pub const MOCK_RATIO: f64 = 2.0;

    /// Test compilation time (ms) above which fixtures are suggested.
    pub const COMPILATION_MS: i64 = 2000;

    /// Average constructor argument count above which fixtures are suggested.
    pub const DEPENDENCY_DEPTH: f64 = 3.0;

    /// Build time variance (percent) above which incremental compilation is flagged.
    pub const BUILD_VARIANCE_PERCENT: f64 = 20.0;

    /// Minimum build history length for variance analysis.
    pub const MIN_BUILD_HISTORY: usize = 3;

    /// Maximum hardcoded resource examples carried as evidence.
    pub const ISOLATION_EXAMPLES: usize = 5;
}
