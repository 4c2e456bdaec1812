// crates/check-gate-cli/src/tests/report.rs
// ============================================================================
// Module: Report Persistence Tests
// Description: Report writing creates directories and emits valid JSON.
// ============================================================================

use std::fs;

use check_gate_core::SuiteName;
use check_gate_core::SuiteOutcome;
use check_gate_core::SuiteSummary;
use check_gate_core::TestRunRecord;
use check_gate_core::Timestamp;
use tempfile::TempDir;

use crate::report::write_report;

fn empty_record() -> TestRunRecord {
    TestRunRecord {
        suite: SuiteName::new("empty"),
        started_at: Timestamp::from_unix_millis(0),
        finished_at: Timestamp::from_unix_millis(1000),
        results: Vec::new(),
        summary: SuiteSummary {
            total: 0,
            passed: 0,
            failed: 0,
            warned: 0,
            success_rate: 100.0,
        },
        outcome: SuiteOutcome::Passed,
        exit_code: 0,
    }
}

#[test]
fn creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test-results/nested/report.json");
    write_report(&path, &empty_record()).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let payload: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(payload["suite"], "empty");
    assert_eq!(payload["started_at"], "1970-01-01T00:00:00Z");
    assert_eq!(payload["outcome"], "passed");
}

#[test]
fn unwritable_destination_reports_path() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "file, not a directory").unwrap();
    let path = blocker.join("report.json");
    let message = write_report(&path, &empty_record()).unwrap_err();
    assert!(message.starts_with("Failed to write test results to"), "{message}");
    assert!(message.contains("report.json"), "{message}");
}
