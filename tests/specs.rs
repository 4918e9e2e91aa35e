//! Behavioral specifications for the tddguard binary.
//!
//! These tests are black-box: they pipe lifecycle events into the binary
//! and verify the report it leaves behind, its stderr and its exit code.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

use prelude::*;

#[test]
fn help_exits_successfully() {
    tddguard_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("tddguard"))
        .stdout(predicates::str::contains("--project-root"));
}

#[test]
fn version_exits_successfully() {
    tddguard_cmd().arg("--version").assert().success();
}

#[test]
fn event_stream_writes_report() {
    let project = Project::gradle().with_marker();
    let events = Events::run()
        .passed("com.example.CalculatorTest", "adds")
        .failed("com.example.CalculatorTest", "divides", "expected 2")
        .skipped("com.example.CalculatorTest", "later")
        .finish();

    tddguard_cmd().current_dir(project.path()).write_stdin(events).assert().success();

    let report = project.report();
    assert_eq!(report["framework"], "junit5");
    assert_eq!(
        report["summary"],
        serde_json::json!({"total": 3, "passed": 1, "failed": 1, "skipped": 1})
    );
    assert_eq!(report["failures"][0]["message"], "expected 2");
    assert_eq!(report["tests"][0]["file"], "src/test/java/com/example/CalculatorTest.java");
    assert!(report["educational"].is_array());
}

#[test]
fn project_root_flag_overrides_working_directory() {
    let project = Project::gradle();
    let elsewhere = tempfile::TempDir::new().unwrap();
    let events = Events::run().passed("com.example.FooTest", "a").finish();

    tddguard_cmd()
        .current_dir(elsewhere.path())
        .arg("--project-root")
        .arg(project.path())
        .arg("--enable")
        .write_stdin(events)
        .assert()
        .success();

    assert_eq!(project.report()["summary"]["total"], 1);
}

#[test]
fn environment_enables_reporting() {
    let project = Project::gradle();
    let events = Events::run().passed("com.example.FooTest", "a").finish();

    tddguard_cmd()
        .current_dir(project.path())
        .env("TDDGUARD_ENABLED", "true")
        .write_stdin(events)
        .assert()
        .success();

    assert!(project.report_path().exists());
}

#[test]
fn disabled_project_writes_nothing() {
    let project = Project::gradle();
    let events = Events::run().passed("com.example.FooTest", "a").finish();

    tddguard_cmd().current_dir(project.path()).write_stdin(events).assert().success();

    assert!(!project.path().join(".claude").exists());
}

#[test]
fn malformed_lines_are_skipped_with_a_warning() {
    let project = Project::gradle().with_marker();
    let events = Events::run()
        .raw("this is not json")
        .raw(r#"{"event":"test_paused"}"#)
        .passed("com.example.FooTest", "a")
        .finish();

    tddguard_cmd()
        .current_dir(project.path())
        .write_stdin(events)
        .assert()
        .success()
        .stderr(predicates::str::contains("malformed event on line 2"));

    assert_eq!(project.report()["summary"]["total"], 1);
}

#[test]
fn non_utf8_line_is_skipped_and_the_run_still_reports() {
    let project = Project::gradle().with_marker();
    let mut stdin = b"{\"event\":\"run_started\"}\ngarbage \xff\xfe line\n".to_vec();
    stdin.extend(Events::default().passed("com.example.FooTest", "a").finish().into_bytes());

    tddguard_cmd()
        .current_dir(project.path())
        .write_stdin(stdin)
        .assert()
        .success()
        .stderr(predicates::str::contains("malformed event on line 2"));

    assert_eq!(project.report()["summary"]["total"], 1);
}

#[test]
fn configured_test_directories_resolve_files() {
    let project = Project::gradle()
        .with_marker()
        .file("src/it/java/com/example/FlowTest.java", "class FlowTest {}");
    let events = Events::run().passed("com.example.FlowTest", "flows").finish();

    tddguard_cmd()
        .current_dir(project.path())
        .args(["--test-source-dirs", "src/it/java, src/test/java"])
        .write_stdin(events)
        .assert()
        .success();

    assert_eq!(project.report()["tests"][0]["file"], "src/it/java/com/example/FlowTest.java");
}

#[test]
fn detectors_report_structure_problems() {
    let project = Project::gradle().with_marker().file(
        "src/main/java/com/example/OrderServiceTest.java",
        "package com.example;\nclass OrderServiceTest { @Test void a() {} }\n",
    );
    let events = Events::run().passed("com.example.OrderServiceTest", "a").finish();

    tddguard_cmd().current_dir(project.path()).write_stdin(events).assert().success();

    let report = project.report();
    let educational = report["educational"].as_array().unwrap();
    assert_eq!(educational.len(), 1);
    assert_eq!(educational[0]["category"], "file-structure");
    assert_eq!(
        educational[0]["evidence"]["testsInMain"],
        serde_json::json!(["src/main/java/com/example/OrderServiceTest.java"])
    );
}

#[test]
fn run_without_finish_writes_nothing() {
    let project = Project::gradle().with_marker();

    tddguard_cmd()
        .current_dir(project.path())
        .write_stdin("{\"event\":\"run_started\"}\n")
        .assert()
        .success();

    assert!(!project.report_path().exists());
}
