// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::{BufRead, IsTerminal};
use std::path::PathBuf;

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use tddguard::config::defaults::{env, keys};
use tddguard::events::{HostEvent, dispatch};
use tddguard::{EnvSource, Listener, MapSource, ReporterConfig};

/// Records test-run telemetry for TDD Guard from JSON-lines lifecycle events on stdin
#[derive(Parser)]
#[command(name = "tddguard")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Project root (default: nearest directory with a build file)
    #[arg(long, value_name = "DIR")]
    project_root: Option<PathBuf>,

    /// Comma-separated test source directories
    #[arg(long, value_name = "DIRS")]
    test_source_dirs: Option<String>,

    /// Comma-separated main source directories
    #[arg(long, value_name = "DIRS")]
    main_source_dirs: Option<String>,

    /// Enable reporting without the .claude/tdd-guard marker directory
    #[arg(long)]
    enable: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn explicit(&self) -> MapSource {
        let root = self.project_root.as_ref().map(|p| p.display().to_string());
        MapSource::new()
            .with_opt(keys::PROJECT_ROOT, root)
            .with_opt(keys::TEST_SOURCE_DIRS, self.test_source_dirs.clone())
            .with_opt(keys::MAIN_SOURCE_DIRS, self.main_source_dirs.clone())
            .with_opt(keys::ENABLED, self.enable.then_some("true"))
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let filter = EnvFilter::builder()
        .with_env_var(env::LOG)
        .with_default_directive(default.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = ReporterConfig::resolve(&cli.explicit(), &EnvSource, &cwd);
    let listener = Listener::new(config);
    if !listener.is_enabled() {
        tracing::debug!("reporting disabled for {}", listener.config().project_root.display());
    }

    let mut stdin = std::io::stdin().lock();
    let mut buf = Vec::new();
    let mut number = 0usize;
    loop {
        buf.clear();
        match stdin.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => number += 1,
            Err(e) => {
                tracing::warn!("stopped reading events: {e}");
                break;
            }
        }
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                tracing::warn!("ignoring malformed event on line {number}: {e}");
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }
        match HostEvent::parse(line) {
            Ok(event) => dispatch(&listener, event),
            Err(e) => tracing::warn!("ignoring malformed event on line {number}: {e}"),
        }
    }

    Ok(())
}
