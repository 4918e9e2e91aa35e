// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Source directory resolution.
//!
//! Pure string resolution: directories are never checked for existence here.
//! An empty list means "nothing configured" and callers apply their defaults.

use crate::config::ConfigSource;
use crate::config::defaults::{dirs, env, keys};

#[cfg(test)]
#[path = "source_dirs_tests.rs"]
mod tests;

/// Configured test and main source directories, relative to the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceDirectoryConfig {
    pub test_dirs: Vec<String>,
    pub main_dirs: Vec<String>,
}

impl SourceDirectoryConfig {
    pub fn new(test_dirs: Vec<String>, main_dirs: Vec<String>) -> Self {
        Self { test_dirs, main_dirs }
    }

    /// Test directories for class-to-file resolution.
    pub fn test_candidates(&self) -> Vec<String> {
        or_defaults(&self.test_dirs, dirs::TEST)
    }

    /// Main directories for class-to-file resolution.
    pub fn main_candidates(&self) -> Vec<String> {
        or_defaults(&self.main_dirs, dirs::MAIN)
    }

    /// Test directories for tree scans.
    pub fn test_scan_dirs(&self) -> Vec<String> {
        or_defaults(&self.test_dirs, dirs::TEST_SCAN)
    }

    /// Main directories for tree scans.
    pub fn main_scan_dirs(&self) -> Vec<String> {
        or_defaults(&self.main_dirs, dirs::MAIN_SCAN)
    }
}

fn or_defaults(configured: &[String], defaults: &[&str]) -> Vec<String> {
    if configured.is_empty() {
        defaults.iter().map(|d| d.to_string()).collect()
    } else {
        configured.to_vec()
    }
}

/// Resolves directory lists from explicit configuration, then the environment.
pub struct SourceDirectoryResolver<'a> {
    explicit: &'a dyn ConfigSource,
    env: &'a dyn ConfigSource,
}

impl<'a> SourceDirectoryResolver<'a> {
    pub fn new(explicit: &'a dyn ConfigSource, env: &'a dyn ConfigSource) -> Self {
        Self { explicit, env }
    }

    pub fn resolve_test_directories(&self) -> Vec<String> {
        self.resolve_directories(keys::TEST_SOURCE_DIRS, env::TEST_SOURCE_DIRS)
    }

    pub fn resolve_main_directories(&self) -> Vec<String> {
        self.resolve_directories(keys::MAIN_SOURCE_DIRS, env::MAIN_SOURCE_DIRS)
    }

    /// Resolve both lists at once.
    pub fn resolve(&self) -> SourceDirectoryConfig {
        SourceDirectoryConfig::new(self.resolve_test_directories(), self.resolve_main_directories())
    }

    fn resolve_directories(&self, key: &str, env_name: &str) -> Vec<String> {
        let raw = non_blank(self.explicit.get(key)).or_else(|| non_blank(self.env.get(env_name)));
        match raw {
            Some(value) => split_list(&value),
            None => Vec::new(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
