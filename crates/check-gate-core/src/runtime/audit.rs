// crates/check-gate-core/src/runtime/audit.rs
// ============================================================================
// Module: Run Audit Logging
// Description: Structured JSON-lines events for suite execution.
// Purpose: Emit machine-readable run logs without leaking secrets.
// Dependencies: crate::{core, interfaces}, serde, serde_json
// ============================================================================

//! ## Overview
//! Audit events mirror the runner's progress notifications. [`AuditObserver`]
//! adapts any [`AuditSink`] into a [`RunObserver`]. Events carry the clock
//! timestamps supplied to the runner; source locations are the declared ones,
//! so HTTP URLs appear as templates and never include substituted secrets.
//! Sink write failures are ignored; logging never changes a verdict.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;

use crate::core::SourceUnavailable;
use crate::core::SuiteOutcome;
use crate::core::SuiteSpec;
use crate::core::SuiteSummary;
use crate::core::TestEntry;
use crate::core::TestName;
use crate::core::TestRunRecord;
use crate::core::TestStatus;
use crate::core::UnavailableReason;
use crate::core::time::Timestamp;
use crate::interfaces::RunObserver;

// ============================================================================
// SECTION: Events
// ============================================================================

/// Audit event payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuditEvent {
    /// Suite execution began.
    SuiteStarted {
        /// Event time.
        timestamp: Timestamp,
        /// Suite name.
        suite: String,
        /// Number of tests scheduled.
        tests: usize,
    },
    /// A test referenced a source that could not be loaded.
    SourceUnavailable {
        /// Event time.
        timestamp: Timestamp,
        /// Owning test.
        test: String,
        /// Source name.
        source: String,
        /// Declared location.
        location: String,
        /// Classified reason.
        reason: UnavailableReason,
    },
    /// A test finished.
    TestCompleted {
        /// Event time.
        timestamp: Timestamp,
        /// Test name.
        test: String,
        /// Test status.
        status: TestStatus,
        /// Verdict message.
        message: String,
    },
    /// Suite execution finished.
    SuiteCompleted {
        /// Event time.
        timestamp: Timestamp,
        /// Suite name.
        suite: String,
        /// Suite counters.
        summary: SuiteSummary,
        /// Suite outcome.
        outcome: SuiteOutcome,
        /// Process exit code.
        exit_code: u8,
    },
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Destination for audit events.
pub trait AuditSink: Send + Sync {
    /// Records one event.
    fn record(&self, event: &AuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &AuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, event: &AuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

// ============================================================================
// SECTION: Observer Adapter
// ============================================================================

/// Run observer that forwards notifications to an audit sink.
pub struct AuditObserver<S> {
    /// Destination sink.
    sink: S,
}

impl<S: AuditSink> AuditObserver<S> {
    /// Wraps a sink.
    #[must_use]
    pub const fn new(sink: S) -> Self {
        Self {
            sink,
        }
    }
}

impl<S: AuditSink> RunObserver for AuditObserver<S> {
    fn on_suite_started(&self, suite: &SuiteSpec, at: Timestamp) {
        self.sink.record(&AuditEvent::SuiteStarted {
            timestamp: at,
            suite: suite.name.to_string(),
            tests: suite.tests.len(),
        });
    }

    fn on_source_unavailable(
        &self,
        test: &TestName,
        unavailable: &SourceUnavailable,
        at: Timestamp,
    ) {
        self.sink.record(&AuditEvent::SourceUnavailable {
            timestamp: at,
            test: test.to_string(),
            source: unavailable.source.to_string(),
            location: unavailable.location.clone(),
            reason: unavailable.reason,
        });
    }

    fn on_test_completed(&self, entry: &TestEntry) {
        self.sink.record(&AuditEvent::TestCompleted {
            timestamp: entry.timestamp,
            test: entry.name.to_string(),
            status: entry.status,
            message: entry.message.clone(),
        });
    }

    fn on_suite_completed(&self, record: &TestRunRecord) {
        self.sink.record(&AuditEvent::SuiteCompleted {
            timestamp: record.finished_at,
            suite: record.suite.to_string(),
            summary: record.summary,
            outcome: record.outcome,
            exit_code: record.exit_code,
        });
    }
}
