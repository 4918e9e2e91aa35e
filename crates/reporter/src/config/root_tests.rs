#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::config::MapSource;
use crate::test_utils::create_tree;
use tempfile::TempDir;

#[test]
fn explicit_root_wins() {
    let tmp = TempDir::new().unwrap();
    let explicit = MapSource::new().with(keys::PROJECT_ROOT, "/explicit/root");
    let env = MapSource::new().with(env::PROJECT_ROOT, "/env/root");

    let root = ProjectRootResolver::new(&explicit, &env, tmp.path()).resolve();

    assert_eq!(root, Path::new("/explicit/root"));
}

#[test]
fn env_root_used_when_no_explicit_root() {
    let tmp = TempDir::new().unwrap();
    let env = MapSource::new().with(env::PROJECT_ROOT, "/env/root");

    let root = ProjectRootResolver::new(&MapSource::new(), &env, tmp.path()).resolve();

    assert_eq!(root, Path::new("/env/root"));
}

#[test]
fn relative_root_is_made_absolute_against_start_dir() {
    let tmp = TempDir::new().unwrap();
    let explicit = MapSource::new().with(keys::PROJECT_ROOT, "module");

    let root = ProjectRootResolver::new(&explicit, &MapSource::new(), tmp.path()).resolve();

    assert_eq!(root, tmp.path().join("module"));
}

#[test]
fn walks_up_to_gradle_build_file() {
    let tmp = TempDir::new().unwrap();
    create_tree(tmp.path(), &[("build.gradle", ""), ("app/src/test/java/.keep", "")]);
    let start = tmp.path().join("app/src/test/java");

    let root = ProjectRootResolver::new(&MapSource::new(), &MapSource::new(), &start).resolve();

    assert_eq!(root, tmp.path());
}

#[test]
fn nearest_build_file_wins() {
    let tmp = TempDir::new().unwrap();
    create_tree(tmp.path(), &[("pom.xml", ""), ("child/build.gradle.kts", ""), ("child/src/.keep", "")]);

    let found = find_build_root(&tmp.path().join("child/src"));

    assert_eq!(found, Some(tmp.path().join("child")));
}
