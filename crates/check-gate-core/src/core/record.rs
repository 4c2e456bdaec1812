// crates/check-gate-core/src/core/record.rs
// ============================================================================
// Module: Run Records
// Description: Check results, test verdicts, and the persisted run record.
// Purpose: Thread one explicit value through evaluate, aggregate and report.
// Dependencies: crate::core::{identifiers, time}, serde, serde_json
// ============================================================================

//! ## Overview
//! Records are produced fresh for every run and never mutated after a test
//! completes. A [`TestRunRecord`] is created at suite start, receives one
//! [`TestEntry`] per test in execution order, and is serialized once.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::CheckName;
use crate::core::identifiers::SourceName;
use crate::core::identifiers::SuiteName;
use crate::core::identifiers::TestName;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Exit Codes
// ============================================================================

/// Exit code for a run that could not start or could not persist its report.
pub const RUN_ERROR_EXIT_CODE: u8 = 3;

// ============================================================================
// SECTION: Check Results
// ============================================================================

/// Outcome of one check evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// Predicate evaluated true on available sources.
    Satisfied,
    /// Predicate evaluated false on available sources.
    Unsatisfied,
    /// At least one referenced source was unavailable.
    SourceUnavailable {
        /// Unavailable sources referenced by the predicate.
        sources: Vec<SourceName>,
    },
}

/// Result of one check in one run.
///
/// # Invariants
/// - `passed` is true iff `outcome` is [`CheckOutcome::Satisfied`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Check name.
    pub name: CheckName,
    /// Boolean result.
    pub passed: bool,
    /// Classified outcome.
    #[serde(flatten)]
    pub outcome: CheckOutcome,
    /// Score weight of the check.
    pub weight: u32,
}

impl CheckResult {
    /// Builds a result from an outcome, deriving `passed`.
    #[must_use]
    pub fn new(name: CheckName, outcome: CheckOutcome, weight: u32) -> Self {
        Self {
            name,
            passed: matches!(outcome, CheckOutcome::Satisfied),
            outcome,
            weight,
        }
    }
}

// ============================================================================
// SECTION: Verdicts
// ============================================================================

/// Ternary test status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    /// All requirements met.
    Pass,
    /// Within the tolerated band.
    Warn,
    /// Requirements not met.
    Fail,
}

impl TestStatus {
    /// Returns the stable label for the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Warn => "WARN",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated verdict for one test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestVerdict {
    /// Ternary status.
    pub status: TestStatus,
    /// Names of failing checks, in definition order.
    pub failed_checks: Vec<CheckName>,
    /// One-line summary.
    pub message: String,
    /// Diagnostic payload with sorted keys.
    pub details: BTreeMap<String, Value>,
}

/// Persisted entry for one test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestEntry {
    /// Test name.
    pub name: TestName,
    /// Ternary status.
    pub status: TestStatus,
    /// One-line summary.
    pub message: String,
    /// Diagnostic payload with sorted keys.
    pub details: BTreeMap<String, Value>,
    /// Completion time.
    pub timestamp: Timestamp,
    /// Per-check results, in definition order.
    #[serde(default)]
    pub checks: Vec<CheckResult>,
}

impl TestEntry {
    /// Builds an entry from a verdict.
    #[must_use]
    pub fn from_verdict(
        name: TestName,
        verdict: TestVerdict,
        checks: Vec<CheckResult>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            name,
            status: verdict.status,
            message: verdict.message,
            details: verdict.details,
            timestamp,
            checks,
        }
    }
}

// ============================================================================
// SECTION: Suite Summary
// ============================================================================

/// Suite-level counters.
///
/// # Invariants
/// - `success_rate == passed / total * 100`, and 100 when `total == 0`.
/// - `warned` counts WARN tests regardless of accounting mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuiteSummary {
    /// Number of tests run.
    pub total: usize,
    /// Tests counted as passed.
    pub passed: usize,
    /// Tests with FAIL status.
    pub failed: usize,
    /// Tests with WARN status.
    pub warned: usize,
    /// Passed tests as a percentage of total.
    pub success_rate: f64,
}

/// Suite outcome derived from the summary and the suite policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuiteOutcome {
    /// Success criterion met.
    Passed,
    /// Success criterion missed, degraded band met.
    Degraded,
    /// Neither met.
    Failed,
}

impl SuiteOutcome {
    /// Returns the stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Degraded => "degraded",
            Self::Failed => "failed",
        }
    }
}

// ============================================================================
// SECTION: Run Record
// ============================================================================

/// Full record of one suite invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRunRecord {
    /// Suite name.
    pub suite: SuiteName,
    /// Suite start time.
    pub started_at: Timestamp,
    /// Suite completion time.
    pub finished_at: Timestamp,
    /// Entries in execution order.
    pub results: Vec<TestEntry>,
    /// Suite counters.
    pub summary: SuiteSummary,
    /// Suite outcome.
    pub outcome: SuiteOutcome,
    /// Process exit code for this outcome.
    pub exit_code: u8,
}

impl TestRunRecord {
    /// Serializes the record as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when a timestamp is out of range.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
