// crates/check-gate-core/src/runtime/runner.rs
// ============================================================================
// Module: Suite Runner
// Description: Sequential execution of a suite's tests into a run record.
// Purpose: Isolate test failures so one test never aborts the run.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The runner executes tests strictly in declaration order. For each test it
//! loads only the referenced sources, evaluates the check table, aggregates a
//! verdict and stamps the entry with the supplied clock. Sources are dropped
//! as soon as the test's entry is built.
//!
//! Failures are contained per test: loader failures become unavailable
//! sources, evaluation errors become FAIL verdicts, and a panic anywhere in a
//! test is caught and recorded as a synthetic FAIL entry.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::panic::catch_unwind;

use crate::core::SourceSet;
use crate::core::SourceUnavailable;
use crate::core::SuiteSpec;
use crate::core::TestDefinition;
use crate::core::TestEntry;
use crate::core::TestRunRecord;
use crate::core::TestStatus;
use crate::core::UnavailableReason;
use crate::core::policy::MissingSourcePolicy;
use crate::interfaces::Clock;
use crate::interfaces::RunObserver;
use crate::interfaces::SourceLoader;
use crate::runtime::aggregator::aggregate;
use crate::runtime::aggregator::error_verdict;
use crate::runtime::aggregator::exit_code;
use crate::runtime::aggregator::missing_source_verdict;
use crate::runtime::aggregator::suite_outcome;
use crate::runtime::aggregator::summarize;
use crate::runtime::evaluator::evaluate_checks;

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Executes suites against a source loader and a clock.
///
/// # Invariants
/// - Tests run sequentially; no test observes another test's sources.
/// - Every test in the suite yields exactly one entry, in order.
pub struct SuiteRunner<L, C> {
    /// Loader used for every declared source.
    loader: L,
    /// Timestamp source.
    clock: C,
    /// Progress observers, notified in registration order.
    observers: Vec<Box<dyn RunObserver>>,
}

impl<L, C> SuiteRunner<L, C>
where
    L: SourceLoader,
    C: Clock,
{
    /// Creates a runner without observers.
    #[must_use]
    pub const fn new(loader: L, clock: C) -> Self {
        Self {
            loader,
            clock,
            observers: Vec::new(),
        }
    }

    /// Registers an observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Box<dyn RunObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Runs every test of `suite` and returns the finished record.
    #[must_use]
    pub fn run(&self, suite: &SuiteSpec) -> TestRunRecord {
        let started_at = self.clock.now();
        for observer in &self.observers {
            observer.on_suite_started(suite, started_at);
        }

        let mut results = Vec::with_capacity(suite.tests.len());
        for test in &suite.tests {
            let entry = match catch_unwind(AssertUnwindSafe(|| self.run_test(suite, test))) {
                Ok(entry) => entry,
                Err(payload) => self.panicked_entry(test, payload.as_ref()),
            };
            for observer in &self.observers {
                observer.on_test_completed(&entry);
            }
            results.push(entry);
        }

        let statuses: Vec<TestStatus> = results.iter().map(|entry| entry.status).collect();
        let summary = summarize(&statuses, suite.policy.warn_accounting);
        let outcome = suite_outcome(&summary, &suite.policy);
        let record = TestRunRecord {
            suite: suite.name.clone(),
            started_at,
            finished_at: self.clock.now(),
            results,
            summary,
            outcome,
            exit_code: exit_code(outcome, &suite.policy),
        };
        for observer in &self.observers {
            observer.on_suite_completed(&record);
        }
        record
    }

    /// Runs a single test to completion.
    fn run_test(&self, suite: &SuiteSpec, test: &TestDefinition) -> TestEntry {
        let sources = self.load_sources(suite, test);
        let unavailable = sources.unavailable();
        if !unavailable.is_empty() {
            let at = self.clock.now();
            for missing in &unavailable {
                for observer in &self.observers {
                    observer.on_source_unavailable(&test.name, missing, at);
                }
            }
        }

        let (verdict, checks) =
            if test.on_missing_source == MissingSourcePolicy::Warn && !unavailable.is_empty() {
                (missing_source_verdict(&unavailable), Vec::new())
            } else {
                match evaluate_checks(&test.checks, &sources) {
                    Ok(results) => (aggregate(test, &results, &sources), results),
                    Err(err) => (error_verdict(err.to_string(), &sources), Vec::new()),
                }
            };
        TestEntry::from_verdict(test.name.clone(), verdict, checks, self.clock.now())
    }

    /// Loads every source referenced by `test`.
    fn load_sources(&self, suite: &SuiteSpec, test: &TestDefinition) -> SourceSet {
        let mut sources = SourceSet::new();
        for name in test.sources() {
            match suite.source(&name) {
                Some(definition) => {
                    let outcome = self.loader.load(definition);
                    sources.insert(name, outcome);
                }
                None => sources.insert_unavailable(
                    SourceUnavailable::new(name, "", UnavailableReason::NotFound)
                        .with_message("source is not declared in the suite"),
                ),
            }
        }
        sources
    }

    /// Builds the synthetic FAIL entry for a test that panicked.
    fn panicked_entry(&self, test: &TestDefinition, payload: &(dyn Any + Send)) -> TestEntry {
        let message = format!("test panicked: {}", panic_message(payload));
        let verdict = error_verdict(message, &SourceSet::new());
        TestEntry::from_verdict(test.name.clone(), verdict, Vec::new(), self.clock.now())
    }
}

/// Extracts a readable message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload.downcast_ref::<&str>().map_or_else(
        || {
            payload
                .downcast_ref::<String>()
                .cloned()
                .unwrap_or_else(|| "unknown panic payload".to_string())
        },
        |text| (*text).to_string(),
    )
}
