// crates/check-gate-core/src/runtime/aggregator.rs
// ============================================================================
// Module: Verdict Aggregator
// Description: Converts check results into test verdicts and suite outcomes.
// Purpose: Apply explicit verdict and suite policies deterministically.
// Dependencies: crate::core, serde_json
// ============================================================================

//! ## Overview
//! Aggregation is total and deterministic: every combination of results and
//! policy yields exactly one verdict, and the message and details depend only
//! on the results, the loaded sources and the policy. Percent thresholds are
//! compared as `passed * 100 >= percent * total` so boundaries are exact.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::core::CheckOutcome;
use crate::core::CheckResult;
use crate::core::SourceSet;
use crate::core::SourceUnavailable;
use crate::core::SuccessCriterion;
use crate::core::SuiteOutcome;
use crate::core::SuitePolicy;
use crate::core::SuiteSummary;
use crate::core::TestDefinition;
use crate::core::TestStatus;
use crate::core::TestVerdict;
use crate::core::VerdictMessages;
use crate::core::VerdictPolicy;
use crate::core::WarnAccounting;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Message used when a test defines no checks.
pub const NO_CHECKS_MESSAGE: &str = "no checks defined";

/// Details key listing every check and its result.
pub const DETAIL_CHECKS: &str = "checks";
/// Details key listing failing check names.
pub const DETAIL_FAILED_CHECKS: &str = "failed_checks";
/// Details key describing unavailable sources.
pub const DETAIL_MISSING_SOURCES: &str = "missing_sources";
/// Details key holding `passed/total`.
pub const DETAIL_PASSED_RATIO: &str = "passed_ratio";
/// Details key holding the weighted score.
pub const DETAIL_SCORE: &str = "score";
/// Details key mapping source names to content digests.
pub const DETAIL_SOURCE_DIGESTS: &str = "source_digests";
/// Details key holding an evaluation or runtime error message.
pub const DETAIL_ERROR: &str = "error";

// ============================================================================
// SECTION: Tallies
// ============================================================================

/// Counts derived from one test's check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tally {
    /// Number of checks.
    total: usize,
    /// Number of passing checks.
    passed: usize,
    /// Number of failing checks.
    failed: usize,
    /// Sum of weights of passing checks.
    score: u64,
    /// Sum of all weights.
    max_score: u64,
}

impl Tally {
    /// Tallies check results.
    fn from_results(results: &[CheckResult]) -> Self {
        let passed = results.iter().filter(|result| result.passed).count();
        let score = results
            .iter()
            .filter(|result| result.passed)
            .map(|result| u64::from(result.weight))
            .sum();
        let max_score = results.iter().map(|result| u64::from(result.weight)).sum();
        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            score,
            max_score,
        }
    }
}

// ============================================================================
// SECTION: Test Verdicts
// ============================================================================

/// Classifies check results under a verdict policy.
#[must_use]
pub fn classify(policy: &VerdictPolicy, results: &[CheckResult]) -> TestStatus {
    classify_tally(policy, Tally::from_results(results))
}

/// Classifies a tally under a verdict policy.
fn classify_tally(policy: &VerdictPolicy, tally: Tally) -> TestStatus {
    if tally.total == 0 {
        return TestStatus::Pass;
    }
    match *policy {
        VerdictPolicy::Strict => {
            if tally.failed == 0 {
                TestStatus::Pass
            } else {
                TestStatus::Fail
            }
        }
        VerdictPolicy::Tolerance {
            pass_max_failures,
            warn_max_failures,
        } => {
            if tally.failed <= pass_max_failures {
                TestStatus::Pass
            } else if tally.failed <= warn_max_failures {
                TestStatus::Warn
            } else {
                TestStatus::Fail
            }
        }
        VerdictPolicy::Ratio {
            pass_min_percent,
            warn_min_percent,
        } => {
            if meets_percent(tally.passed, tally.total, pass_min_percent) {
                TestStatus::Pass
            } else if meets_percent(tally.passed, tally.total, warn_min_percent) {
                TestStatus::Warn
            } else {
                TestStatus::Fail
            }
        }
        VerdictPolicy::Score {
            pass_min_score,
            warn_min_score,
        } => {
            if tally.score >= u64::from(pass_min_score) {
                TestStatus::Pass
            } else if tally.score >= u64::from(warn_min_score) {
                TestStatus::Warn
            } else {
                TestStatus::Fail
            }
        }
    }
}

/// Aggregates evaluated check results into a verdict for `test`.
#[must_use]
pub fn aggregate(
    test: &TestDefinition,
    results: &[CheckResult],
    sources: &SourceSet,
) -> TestVerdict {
    let tally = Tally::from_results(results);
    let status = classify_tally(&test.policy, tally);
    let failed_checks: Vec<_> =
        results.iter().filter(|result| !result.passed).map(|result| result.name.clone()).collect();

    let message = if tally.total == 0 {
        NO_CHECKS_MESSAGE.to_string()
    } else {
        render_message(&test.messages, &test.policy, status, tally)
    };

    let mut details = BTreeMap::new();
    details.insert(DETAIL_CHECKS.to_string(), checks_detail(results));
    details.insert(
        DETAIL_FAILED_CHECKS.to_string(),
        Value::Array(failed_checks.iter().map(|name| Value::String(name.to_string())).collect()),
    );
    details.insert(
        DETAIL_PASSED_RATIO.to_string(),
        Value::String(format!("{}/{}", tally.passed, tally.total)),
    );
    if matches!(test.policy, VerdictPolicy::Score { .. }) {
        details.insert(
            DETAIL_SCORE.to_string(),
            json!({ "achieved": tally.score, "max": tally.max_score }),
        );
    }
    let unavailable = sources.unavailable();
    if !unavailable.is_empty() {
        details.insert(DETAIL_MISSING_SOURCES.to_string(), missing_sources_detail(&unavailable));
    }
    let digests = sources.digests();
    if !digests.is_empty() {
        let map: Map<String, Value> = digests
            .into_iter()
            .map(|(name, digest)| (name.to_string(), Value::String(digest.to_string())))
            .collect();
        details.insert(DETAIL_SOURCE_DIGESTS.to_string(), Value::Object(map));
    }

    TestVerdict {
        status,
        failed_checks,
        message,
        details,
    }
}

/// Builds the WARN verdict used when sources are missing and the test opts to skip.
#[must_use]
pub fn missing_source_verdict(unavailable: &[&SourceUnavailable]) -> TestVerdict {
    let names: Vec<String> = unavailable.iter().map(|entry| entry.source.to_string()).collect();
    let mut details = BTreeMap::new();
    details.insert(DETAIL_MISSING_SOURCES.to_string(), missing_sources_detail(unavailable));
    TestVerdict {
        status: TestStatus::Warn,
        failed_checks: Vec::new(),
        message: format!("skipped: source unavailable: {}", names.join(", ")),
        details,
    }
}

/// Builds the FAIL verdict for a test that could not be evaluated.
#[must_use]
pub fn error_verdict(message: impl Into<String>, sources: &SourceSet) -> TestVerdict {
    let message = message.into();
    let mut details = BTreeMap::new();
    details.insert(DETAIL_ERROR.to_string(), Value::String(message.clone()));
    let unavailable = sources.unavailable();
    if !unavailable.is_empty() {
        details.insert(DETAIL_MISSING_SOURCES.to_string(), missing_sources_detail(&unavailable));
    }
    TestVerdict {
        status: TestStatus::Fail,
        failed_checks: Vec::new(),
        message: format!("error: {message}"),
        details,
    }
}

// ============================================================================
// SECTION: Suite Outcome
// ============================================================================

/// Computes suite counters from test statuses.
#[must_use]
pub fn summarize(statuses: &[TestStatus], accounting: WarnAccounting) -> SuiteSummary {
    let total = statuses.len();
    let pass = statuses.iter().filter(|status| **status == TestStatus::Pass).count();
    let warned = statuses.iter().filter(|status| **status == TestStatus::Warn).count();
    let failed = statuses.iter().filter(|status| **status == TestStatus::Fail).count();
    let passed = match accounting {
        WarnAccounting::CountsAsPass => pass + warned,
        WarnAccounting::Separate => pass,
    };
    SuiteSummary {
        total,
        passed,
        failed,
        warned,
        success_rate: success_rate(passed, total),
    }
}

/// Returns `passed / total * 100`, or 0 for an empty suite.
#[must_use]
#[allow(clippy::cast_precision_loss, reason = "Test counts are far below 2^52.")]
pub fn success_rate(passed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    passed as f64 / total as f64 * 100.0
}

/// Decides the suite outcome under `policy`.
#[must_use]
pub fn suite_outcome(summary: &SuiteSummary, policy: &SuitePolicy) -> SuiteOutcome {
    let success = match policy.success {
        SuccessCriterion::NoFailures => summary.failed == 0,
        SuccessCriterion::MinSuccessRate {
            percent,
        } => meets_percent(summary.passed, summary.total, percent),
    };
    if success {
        return SuiteOutcome::Passed;
    }
    match policy.degraded_min_success_rate {
        Some(percent) if meets_percent(summary.passed, summary.total, percent) => {
            SuiteOutcome::Degraded
        }
        _ => SuiteOutcome::Failed,
    }
}

/// Maps a suite outcome to a process exit code.
#[must_use]
pub const fn exit_code(outcome: SuiteOutcome, policy: &SuitePolicy) -> u8 {
    match outcome {
        SuiteOutcome::Passed => 0,
        SuiteOutcome::Degraded => 1,
        SuiteOutcome::Failed => {
            if policy.degraded_min_success_rate.is_some() {
                2
            } else {
                1
            }
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true when `part / whole >= percent / 100`, using integer math.
fn meets_percent(part: usize, whole: usize, percent: u8) -> bool {
    if whole == 0 {
        return true;
    }
    (part as u128) * 100 >= u128::from(percent) * (whole as u128)
}

/// Renders the verdict message from templates or defaults.
fn render_message(
    messages: &VerdictMessages,
    policy: &VerdictPolicy,
    status: TestStatus,
    tally: Tally,
) -> String {
    let custom = match status {
        TestStatus::Pass => messages.pass.as_deref(),
        TestStatus::Warn => messages.warn.as_deref(),
        TestStatus::Fail => messages.fail.as_deref(),
    };
    let template = custom.unwrap_or_else(|| default_template(policy, status));
    template
        .replace("{failed}", &tally.failed.to_string())
        .replace("{passed}", &tally.passed.to_string())
        .replace("{total}", &tally.total.to_string())
        .replace("{score}", &tally.score.to_string())
        .replace("{max_score}", &tally.max_score.to_string())
}

/// Default message template for a policy and status.
const fn default_template(policy: &VerdictPolicy, status: TestStatus) -> &'static str {
    match (policy, status) {
        (VerdictPolicy::Score { .. }, TestStatus::Pass) => "score {score}/{max_score}",
        (VerdictPolicy::Score { .. }, TestStatus::Warn) => {
            "score {score}/{max_score} below pass threshold"
        }
        (VerdictPolicy::Score { .. }, TestStatus::Fail) => {
            "score {score}/{max_score} below warn threshold"
        }
        (_, TestStatus::Pass) => "{passed}/{total} checks passed",
        (_, TestStatus::Warn) => "{failed} of {total} checks failed (within tolerance)",
        (_, TestStatus::Fail) => "{failed} of {total} checks failed",
    }
}

/// Builds the ordered per-check detail array.
fn checks_detail(results: &[CheckResult]) -> Value {
    Value::Array(
        results
            .iter()
            .map(|result| {
                let mut entry = Map::new();
                entry.insert("name".to_string(), Value::String(result.name.to_string()));
                entry.insert("passed".to_string(), Value::Bool(result.passed));
                if let CheckOutcome::SourceUnavailable {
                    sources,
                } = &result.outcome
                {
                    entry.insert(
                        "unavailable_sources".to_string(),
                        Value::Array(
                            sources.iter().map(|name| Value::String(name.to_string())).collect(),
                        ),
                    );
                }
                Value::Object(entry)
            })
            .collect(),
    )
}

/// Builds the missing-source detail array.
fn missing_sources_detail(unavailable: &[&SourceUnavailable]) -> Value {
    Value::Array(
        unavailable
            .iter()
            .map(|entry| {
                let mut object = Map::new();
                object.insert("source".to_string(), Value::String(entry.source.to_string()));
                object.insert("location".to_string(), Value::String(entry.location.clone()));
                object.insert("reason".to_string(), Value::String(entry.reason.to_string()));
                if let Some(message) = &entry.message {
                    object.insert("message".to_string(), Value::String(message.clone()));
                }
                Value::Object(object)
            })
            .collect(),
    )
}
