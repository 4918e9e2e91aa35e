#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use std::fs;
use tempfile::TempDir;
use yare::parameterized;

fn no_values(_: &str) -> Option<String> {
    None
}

#[parameterized(
    lower = { "true" },
    upper = { "TRUE" },
    mixed = { "True" },
    padded = { " tRuE " },
)]
fn true_signal_enables_in_any_case(signal: &str) {
    let tmp = TempDir::new().unwrap();
    assert!(is_enabled(Some(signal), tmp.path()));
}

#[parameterized(
    absent = { None },
    false_value = { Some("false") },
    one = { Some("1") },
    yes = { Some("yes") },
    empty = { Some("") },
)]
fn other_signals_do_not_enable_without_marker(signal: Option<&str>) {
    let tmp = TempDir::new().unwrap();
    assert!(!is_enabled(signal, tmp.path()));
}

#[test]
fn marker_directory_enables() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".claude/tdd-guard")).unwrap();
    assert!(is_enabled(None, tmp.path()));
}

#[test]
fn resolve_reads_enable_signal_from_env() {
    let tmp = TempDir::new().unwrap();
    let env = |key: &str| (key == defaults::env::ENABLED).then(|| "TRUE".to_string());
    let explicit = MapSource::new().with(defaults::keys::PROJECT_ROOT, tmp.path().to_string_lossy());

    let config = ReporterConfig::resolve(&explicit, &env, tmp.path());

    assert!(config.enabled);
    assert_eq!(config.project_root, tmp.path());
}

#[test]
fn explicit_enable_signal_wins_over_env() {
    let tmp = TempDir::new().unwrap();
    let explicit = MapSource::new()
        .with(defaults::keys::ENABLED, "false")
        .with(defaults::keys::PROJECT_ROOT, tmp.path().to_string_lossy());
    let env = MapSource::new().with(defaults::env::ENABLED, "true");

    let config = ReporterConfig::resolve(&explicit, &env, tmp.path());

    assert!(!config.enabled);
}

#[test]
fn resolve_collects_source_dirs() {
    let tmp = TempDir::new().unwrap();
    let explicit = MapSource::new()
        .with(defaults::keys::PROJECT_ROOT, tmp.path().to_string_lossy())
        .with(defaults::keys::TEST_SOURCE_DIRS, "src/it/java, src/test/java");

    let config = ReporterConfig::resolve(&explicit, &no_values, tmp.path());

    assert_eq!(config.source_dirs.test_dirs, vec!["src/it/java", "src/test/java"]);
    assert!(config.source_dirs.main_dirs.is_empty());
}

#[test]
fn output_path_is_under_marker_directory() {
    let config = ReporterConfig::for_root("/project", true);
    assert_eq!(config.output_path(), std::path::Path::new("/project/.claude/tdd-guard/data/test.json"));
}

#[test]
fn map_source_with_opt_skips_none() {
    let source = MapSource::new().with_opt("a", Some("1")).with_opt("b", None::<String>);
    assert_eq!(source.get("a"), Some("1".to_string()));
    assert_eq!(source.get("b"), None);
}
