// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Source tree walking.
//!
//! Classifies source files as test or production code by location only.
//! Build output directories and hidden entries are never descended into.
//! Walk errors are logged and skipped; a tree that cannot be walked yields
//! no files.

use std::path::{Component, Path, PathBuf};

use ignore::{DirEntry, WalkBuilder};

use crate::config::defaults::{paths, source};
use crate::source_dirs::SourceDirectoryConfig;

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;

/// Finds test and production sources using the configured directory layout.
#[derive(Debug, Clone, Default)]
pub struct SourceAnalyzer {
    dirs: SourceDirectoryConfig,
}

impl SourceAnalyzer {
    pub fn new(dirs: SourceDirectoryConfig) -> Self {
        Self { dirs }
    }

    /// Source files under a test directory, as absolute paths.
    pub fn find_test_files(&self, root: &Path) -> Vec<PathBuf> {
        let dirs = self.dirs.test_scan_dirs();
        walk_sources(root).into_iter().filter(|p| under_any(root, p, &dirs)).collect()
    }

    /// Source files under a production directory, as absolute paths.
    pub fn find_main_files(&self, root: &Path) -> Vec<PathBuf> {
        let dirs = self.dirs.main_scan_dirs();
        walk_sources(root).into_iter().filter(|p| under_any(root, p, &dirs)).collect()
    }
}

/// All recognized source files below `root`, sorted.
pub fn walk_sources(root: &Path) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(true)
        .follow_links(false)
        .filter_entry(|entry| !is_output_dir(entry))
        .build();

    let mut files = Vec::new();
    for result in walker {
        match result {
            Ok(entry) => {
                if entry.file_type().is_some_and(|t| t.is_file()) && is_source_file(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                tracing::debug!("skipping unreadable entry under {}: {}", root.display(), e);
            }
        }
    }
    files.sort();
    files
}

fn is_output_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|t| t.is_dir())
        && entry.file_name().to_str().is_some_and(|name| paths::OUTPUT_DIRS.contains(&name))
}

/// Whether `path` has a recognized source extension.
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| source::EXTENSIONS.contains(&ext))
}

fn under_any(root: &Path, path: &Path, dirs: &[String]) -> bool {
    let rel = path.strip_prefix(root).unwrap_or(path);
    dirs.iter().any(|dir| in_directory(rel, dir))
}

/// Whether the directory part of `rel` contains `dir` as a run of components.
///
/// `app/src/test/java/FooTest.java` is in `src/test/java`; so is
/// `src/test/java/FooTest.java`. `src/testing/Foo.java` is not in `src/test`.
pub fn in_directory(rel: &Path, dir: &str) -> bool {
    let needle: Vec<Component<'_>> =
        Path::new(dir).components().filter(|c| matches!(c, Component::Normal(_))).collect();
    if needle.is_empty() {
        return false;
    }

    let haystack: Vec<Component<'_>> = match rel.parent() {
        Some(parent) => parent.components().collect(),
        None => return false,
    };
    haystack.windows(needle.len()).any(|window| window == needle.as_slice())
}

/// Read a source file, or `None` when it cannot be read as UTF-8 text.
pub fn read_source(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            tracing::debug!("skipping unreadable file {}: {}", path.display(), e);
            None
        }
    }
}

/// Path of `path` relative to `root`, for display in evidence.
pub fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).to_string_lossy().into_owned()
}

/// File name without extension, e.g. the class name of `FooTest.java`.
pub fn class_name(path: &Path) -> Option<&str> {
    if !is_source_file(path) {
        return None;
    }
    path.file_stem().and_then(|s| s.to_str())
}
