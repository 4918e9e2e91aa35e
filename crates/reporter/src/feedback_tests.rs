#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use serde_json::json;
use yare::parameterized;

fn build(category: &str, severity: &str, evidence: Value) -> Result<Feedback, FeedbackError> {
    Feedback::parse(category, severity, "Title", evidence, "Message.", "Recommendation.")
}

#[test]
fn valid_feedback_keeps_all_fields() {
    let feedback = build("mock-overuse", "warning", json!({"mockCount": 3})).unwrap();

    assert_eq!(feedback.category(), "mock-overuse");
    assert_eq!(feedback.severity(), Severity::Warning);
    assert_eq!(feedback.evidence()["mockCount"], 3);
    assert_eq!(feedback.title(), "Title");
}

#[test]
fn empty_evidence_object_is_accepted() {
    let feedback = build("file-structure", "info", json!({})).unwrap();
    assert!(feedback.evidence().is_empty());
}

#[parameterized(
    error = { "error" },
    critical = { "critical" },
    capitalized = { "Warning" },
    empty = { "" },
)]
fn invalid_severity_is_rejected(severity: &str) {
    let err = build("mock-overuse", severity, json!({})).unwrap_err();
    assert_eq!(err, FeedbackError::InvalidSeverity(severity.to_string()));
}

#[parameterized(
    empty = { "" },
    blank = { "   " },
)]
fn empty_category_is_rejected(category: &str) {
    assert_eq!(build(category, "info", json!({})).unwrap_err(), FeedbackError::EmptyCategory);
}

#[parameterized(
    null = { Value::Null, "null" },
    array = { json!([1, 2]), "array" },
    string = { json!("evidence"), "string" },
)]
fn non_object_evidence_is_rejected(evidence: Value, kind: &str) {
    let err = build("missing-isolation", "warning", evidence).unwrap_err();
    assert_eq!(err.to_string(), format!("evidence must be a JSON object, got {kind}"));
}

#[test]
fn severity_serializes_lowercase() {
    let feedback = build("x", "info", json!({})).unwrap();
    let value = serde_json::to_value(&feedback).unwrap();
    assert_eq!(value["severity"], "info");
    assert!(value["evidence"].is_object());
}

#[test]
fn severity_round_trips_through_display() {
    for severity in [Severity::Info, Severity::Warning] {
        assert_eq!(severity.to_string().parse::<Severity>().unwrap(), severity);
    }
}

#[test]
fn deserialized_feedback_is_validated() {
    let blank_category = json!({
        "category": " ",
        "severity": "info",
        "title": "Title",
        "evidence": {},
        "message": "Message.",
        "recommendation": "Recommendation.",
    });
    let err = serde_json::from_value::<Feedback>(blank_category).unwrap_err();
    assert!(err.to_string().contains("category cannot be empty"), "{err}");

    let array_evidence = json!({
        "category": "mock-overuse",
        "severity": "warning",
        "title": "Title",
        "evidence": [1],
        "message": "Message.",
        "recommendation": "Recommendation.",
    });
    let err = serde_json::from_value::<Feedback>(array_evidence).unwrap_err();
    assert!(err.to_string().contains("evidence must be a JSON object"), "{err}");
}

#[test]
fn serialized_feedback_reads_back_equal() {
    let feedback = build("mock-overuse", "warning", json!({"mockCount": 3})).unwrap();
    let value = serde_json::to_value(&feedback).unwrap();
    assert_eq!(serde_json::from_value::<Feedback>(value).unwrap(), feedback);
}
