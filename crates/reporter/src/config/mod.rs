// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reporter configuration.
//!
//! Values come from two providers with fixed precedence: explicit
//! configuration (in-process values or CLI flags), then the environment,
//! then the built-in defaults in [`defaults`].

pub mod defaults;
pub mod root;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::source_dirs::{SourceDirectoryConfig, SourceDirectoryResolver};

pub use root::ProjectRootResolver;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

/// A key/value configuration provider.
pub trait ConfigSource: Send + Sync {
    /// Look up a raw value by key.
    fn get(&self, key: &str) -> Option<String>;
}

impl<F> ConfigSource for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn get(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// Reads from the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Explicit in-memory configuration values.
#[derive(Debug, Default, Clone)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any previous one.
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// Set a value only when present.
    pub fn with_opt(self, key: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }
}

impl ConfigSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Configuration resolved once per process.
#[derive(Debug, Clone)]
pub struct ReporterConfig {
    /// Whether the listener captures anything at all.
    pub enabled: bool,
    /// Absolute project root.
    pub project_root: PathBuf,
    /// Configured source directories (empty lists mean defaults).
    pub source_dirs: SourceDirectoryConfig,
}

impl ReporterConfig {
    /// Resolve configuration from an explicit provider and an environment provider.
    pub fn resolve(explicit: &dyn ConfigSource, env: &dyn ConfigSource, cwd: &Path) -> Self {
        let project_root = ProjectRootResolver::new(explicit, env, cwd).resolve();

        let signal = explicit
            .get(defaults::keys::ENABLED)
            .or_else(|| env.get(defaults::env::ENABLED));
        let enabled = is_enabled(signal.as_deref(), &project_root);

        let source_dirs = SourceDirectoryResolver::new(explicit, env).resolve();

        tracing::debug!(
            "reporter config: enabled={} root={} dirs={:?}",
            enabled,
            project_root.display(),
            source_dirs
        );

        Self { enabled, project_root, source_dirs }
    }

    /// Resolve from the process environment and working directory.
    pub fn from_env() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::resolve(&MapSource::new(), &EnvSource, &cwd)
    }

    /// Build a config for a known root, with nothing configured.
    pub fn for_root(project_root: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            enabled,
            project_root: project_root.into(),
            source_dirs: SourceDirectoryConfig::default(),
        }
    }

    /// Path of the run report.
    pub fn output_path(&self) -> PathBuf {
        self.project_root.join(defaults::paths::OUTPUT_FILE)
    }
}

/// The reporter is enabled by an explicit "true" signal or by the marker directory.
pub fn is_enabled(signal: Option<&str>, project_root: &Path) -> bool {
    if signal.is_some_and(|s| s.trim().eq_ignore_ascii_case("true")) {
        return true;
    }
    project_root.join(defaults::paths::MARKER_DIR).exists()
}
