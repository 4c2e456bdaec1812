// crates/check-gate-core/tests/runner.rs
// ============================================================================
// Module: Suite Runner Tests
// Description: Sequencing, isolation and observer notifications.
// ============================================================================

//! ## Overview
//! Runs small suites through [`SuiteRunner`] with in-memory loaders to verify
//! that tests are independent, panics are contained, and records are complete.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use check_gate_core::CheckDefinition;
use check_gate_core::MissingSourcePolicy;
use check_gate_core::Predicate;
use check_gate_core::SuiteName;
use check_gate_core::SuiteOutcome;
use check_gate_core::SuitePolicy;
use check_gate_core::SuiteRunner;
use check_gate_core::SuiteSpec;
use check_gate_core::TestDefinition;
use check_gate_core::TestStatus;
use check_gate_core::VerdictPolicy;
use common::MapLoader;
use common::RecordingObserver;
use common::StepClock;
use common::file_source;
use serde_json::json;

fn airdrop_suite() -> SuiteSpec {
    SuiteSpec {
        name: SuiteName::new("airdrop fix"),
        policy: SuitePolicy::default(),
        sources: vec![file_source("bot", "bot.js"), file_source("manager", "wallet-manager.js")],
        tests: vec![
            TestDefinition::new(
                "Airdrop Command Implementation",
                VerdictPolicy::warn_up_to(2),
                vec![
                    CheckDefinition::new("command", Predicate::contains("bot", "bot.command('airdrop'")),
                    CheckDefinition::new("menu", Predicate::contains("bot", "showAirdropMenu")),
                ],
            ),
            TestDefinition::new(
                "Wallet Manager",
                VerdictPolicy::Strict,
                vec![CheckDefinition::new("create", Predicate::contains("manager", "createWallet"))],
            ),
        ],
    }
}

#[test]
fn runs_tests_in_order_and_summarizes() {
    let loader = MapLoader::default()
        .with("bot", "bot.command('airdrop', showAirdropMenu)")
        .with("manager", "function createWallet() {}");
    let record = SuiteRunner::new(loader, StepClock::starting_at(1_700_000_000_000)).run(&airdrop_suite());

    let names: Vec<&str> = record.results.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, ["Airdrop Command Implementation", "Wallet Manager"]);
    assert!(record.results.iter().all(|entry| entry.status == TestStatus::Pass));
    assert_eq!(record.summary.total, 2);
    assert_eq!(record.outcome, SuiteOutcome::Passed);
    assert_eq!(record.exit_code, 0);
    assert!(record.started_at < record.finished_at);
}

#[test]
fn missing_source_fails_only_dependent_test() {
    let loader = MapLoader::default().with("bot", "bot.command('airdrop', showAirdropMenu)");
    let record = SuiteRunner::new(loader, StepClock::starting_at(0)).run(&airdrop_suite());

    assert_eq!(record.results[0].status, TestStatus::Pass);
    assert_eq!(record.results[1].status, TestStatus::Fail);
    assert_eq!(record.results[1].details["missing_sources"][0]["location"], json!("wallet-manager.js"));
    assert_eq!(record.results[1].details["missing_sources"][0]["message"], json!("no such file"));
    assert_eq!(record.exit_code, 1);
}

#[test]
fn warn_policy_skips_evaluation_when_source_missing() {
    let mut suite = airdrop_suite();
    suite.tests[1].on_missing_source = MissingSourcePolicy::Warn;
    let loader = MapLoader::default().with("bot", "bot.command('airdrop', showAirdropMenu)");
    let record = SuiteRunner::new(loader, StepClock::starting_at(0)).run(&suite);

    let entry = &record.results[1];
    assert_eq!(entry.status, TestStatus::Warn);
    assert!(entry.checks.is_empty());
    assert_eq!(record.summary.warned, 1);
    assert_eq!(record.summary.passed, 2);
    assert_eq!(record.outcome, SuiteOutcome::Passed);
}

#[test]
fn panicking_test_becomes_synthetic_fail_and_run_continues() {
    let loader = MapLoader::default()
        .with("bot", "bot.command('airdrop', showAirdropMenu)")
        .with("manager", "createWallet")
        .panicking_on("bot");
    let record = SuiteRunner::new(loader, StepClock::starting_at(0)).run(&airdrop_suite());

    assert_eq!(record.results.len(), 2);
    let crashed = &record.results[0];
    assert_eq!(crashed.status, TestStatus::Fail);
    let error = crashed.details["error"].as_str().unwrap();
    assert!(error.contains("loader exploded on bot"), "{error}");
    assert_eq!(record.results[1].status, TestStatus::Pass);
}

#[test]
fn evaluation_error_fails_test_with_error_detail() {
    let mut suite = airdrop_suite();
    suite.tests[0].checks.push(CheckDefinition::new("broken", Predicate::regex("bot", "(unclosed")));
    let loader = MapLoader::default()
        .with("bot", "bot.command('airdrop', showAirdropMenu)")
        .with("manager", "createWallet");
    let record = SuiteRunner::new(loader, StepClock::starting_at(0)).run(&suite);

    assert_eq!(record.results[0].status, TestStatus::Fail);
    assert!(record.results[0].details["error"].as_str().unwrap().contains("invalid regex"));
    assert_eq!(record.results[1].status, TestStatus::Pass);
}

#[test]
fn observers_receive_events_in_order() {
    let observer = RecordingObserver::default();
    let events = observer.events.clone();
    let loader = MapLoader::default().with("bot", "bot.command('airdrop', showAirdropMenu)");
    let runner = SuiteRunner::new(loader, StepClock::starting_at(0)).with_observer(Box::new(observer));
    let _ = runner.run(&airdrop_suite());

    let events = events.lock().unwrap().clone();
    assert_eq!(events, vec![
        "started:airdrop fix".to_string(),
        "completed:Airdrop Command Implementation:PASS".to_string(),
        "unavailable:Wallet Manager:manager".to_string(),
        "completed:Wallet Manager:FAIL".to_string(),
        "finished:1".to_string(),
    ]);
}

#[test]
fn record_serializes_with_rfc3339_timestamps() {
    let loader = MapLoader::default()
        .with("bot", "bot.command('airdrop', showAirdropMenu)")
        .with("manager", "createWallet");
    let record = SuiteRunner::new(loader, StepClock::starting_at(1_700_000_000_000)).run(&airdrop_suite());
    let json: serde_json::Value = serde_json::from_str(&record.to_json_pretty().unwrap()).unwrap();

    assert_eq!(json["started_at"], json!("2023-11-14T22:13:20Z"));
    assert_eq!(json["results"][0]["status"], json!("PASS"));
    assert_eq!(json["summary"]["success_rate"], json!(100.0));
    assert_eq!(json["outcome"], json!("passed"));
}
