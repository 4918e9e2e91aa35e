// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project root discovery.
//!
//! Walks from the working directory up to the filesystem root looking for a
//! Gradle or Maven build file, unless a root is configured explicitly.

use std::path::{Path, PathBuf};

use super::ConfigSource;
use super::defaults::{env, keys, paths};

#[cfg(test)]
#[path = "root_tests.rs"]
mod tests;

pub struct ProjectRootResolver<'a> {
    explicit: &'a dyn ConfigSource,
    env: &'a dyn ConfigSource,
    start_dir: &'a Path,
}

impl<'a> ProjectRootResolver<'a> {
    pub fn new(
        explicit: &'a dyn ConfigSource,
        env: &'a dyn ConfigSource,
        start_dir: &'a Path,
    ) -> Self {
        Self { explicit, env, start_dir }
    }

    /// Resolve the project root. The result is always absolute when `start_dir` is.
    pub fn resolve(&self) -> PathBuf {
        if let Some(root) = self.explicit.get(keys::PROJECT_ROOT) {
            return self.absolute(&root);
        }

        if let Some(root) = self.env.get(env::PROJECT_ROOT) {
            return self.absolute(&root);
        }

        if let Some(root) = find_build_root(self.start_dir) {
            return root;
        }

        tracing::warn!(
            "no build file found ({}), using working directory {}",
            paths::BUILD_FILES.join(", "),
            self.start_dir.display()
        );
        self.start_dir.to_path_buf()
    }

    fn absolute(&self, raw: &str) -> PathBuf {
        let path = Path::new(raw);
        if path.is_absolute() { path.to_path_buf() } else { self.start_dir.join(path) }
    }
}

/// Find the nearest ancestor of `start_dir` (inclusive) holding a build file.
pub fn find_build_root(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .find(|dir| paths::BUILD_FILES.iter().any(|f| dir.join(f).exists()))
        .map(Path::to_path_buf)
}
