// crates/check-gate-cli/src/console.rs
// ============================================================================
// Module: Console Reporter
// Description: Human-readable run transcript written as tests complete.
// Purpose: Stream one status line per test plus a closing summary block.
// Dependencies: check-gate-core, crate::i18n
// ============================================================================

//! ## Overview
//! [`ConsoleObserver`] is a [`RunObserver`] that prints the banner when the
//! suite starts, the rendered entry for every completed test followed by one
//! line per check and, at the end, the summary counters and overall verdict.
//! Quiet mode keeps only the banner and the closing block. Write failures are ignored so a closed stdout never
//! aborts a run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::sync::Mutex;

use check_gate_core::RunObserver;
use check_gate_core::SuiteOutcome;
use check_gate_core::SuiteSpec;
use check_gate_core::TestEntry;
use check_gate_core::TestRunRecord;
use check_gate_core::Timestamp;
use check_gate_core::runtime::report::render_check;
use check_gate_core::runtime::report::render_entry;
use check_gate_core::runtime::report::render_summary;

use crate::t;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Width of the separator rules.
const RULE_WIDTH: usize = 70;

// ============================================================================
// SECTION: Observer
// ============================================================================

/// Streams the run transcript to a writer.
pub struct ConsoleObserver<W> {
    /// Destination writer.
    out: Mutex<W>,
    /// Suppress per-test and per-check lines.
    quiet: bool,
}

impl<W: Write> ConsoleObserver<W> {
    /// Creates an observer writing to `out`.
    #[must_use]
    pub const fn new(out: W, quiet: bool) -> Self {
        Self {
            out: Mutex::new(out),
            quiet,
        }
    }

    /// Writes lines, ignoring I/O failures.
    fn emit<I>(&self, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        if let Ok(mut out) = self.out.lock() {
            for line in lines {
                let _ = writeln!(out, "{line}");
            }
            let _ = out.flush();
        }
    }
}

impl<W: Write> RunObserver for ConsoleObserver<W> {
    fn on_suite_started(&self, suite: &SuiteSpec, _at: Timestamp) {
        self.emit([
            t!("run.banner", suite = suite.name, tests = suite.tests.len()),
            rule(),
        ]);
    }

    fn on_test_completed(&self, entry: &TestEntry) {
        if !self.quiet {
            let mut lines = render_entry(entry);
            let details = lines.split_off(1);
            lines.extend(entry.checks.iter().map(render_check));
            lines.extend(details);
            self.emit(lines);
        }
    }

    fn on_suite_completed(&self, record: &TestRunRecord) {
        let mut lines = vec![
            String::new(),
            rule(),
            t!("run.results.header", suite = record.suite.as_str().to_uppercase()),
            rule(),
        ];
        lines.extend(render_summary(&record.summary));
        lines.push(String::new());
        lines.push(outcome_line(record.outcome));
        self.emit(lines);
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns a separator rule.
fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Returns the overall verdict line.
fn outcome_line(outcome: SuiteOutcome) -> String {
    match outcome {
        SuiteOutcome::Passed => t!("run.outcome.passed"),
        SuiteOutcome::Degraded => t!("run.outcome.degraded"),
        SuiteOutcome::Failed => t!("run.outcome.failed"),
    }
}
