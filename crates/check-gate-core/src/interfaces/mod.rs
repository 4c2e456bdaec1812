// crates/check-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Check Gate Interfaces
// Description: Backend-agnostic seams for source loading, time and observation.
// Purpose: Keep the runtime free of filesystem, network and clock access.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The runner reaches the outside world only through these traits. Source
//! loaders turn declarations into text or an explicit unavailability
//! diagnostic; clocks supply timestamps; observers receive progress events
//! (console transcript, audit log) without influencing verdicts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::SourceBlob;
use crate::core::SourceDefinition;
use crate::core::SourceUnavailable;
use crate::core::SuiteSpec;
use crate::core::TestEntry;
use crate::core::TestName;
use crate::core::TestRunRecord;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Source Loader
// ============================================================================

/// Loads the text of a declared source.
///
/// Implementations must never panic on missing or malformed inputs; every
/// failure is reported as [`SourceUnavailable`].
pub trait SourceLoader {
    /// Loads one source.
    ///
    /// # Errors
    ///
    /// Returns [`SourceUnavailable`] when the source cannot be read, is too
    /// large, is not UTF-8, or (for HTTP) the request fails.
    fn load(&self, definition: &SourceDefinition) -> Result<SourceBlob, SourceUnavailable>;
}

impl<T: SourceLoader + ?Sized> SourceLoader for &T {
    fn load(&self, definition: &SourceDefinition) -> Result<SourceBlob, SourceUnavailable> {
        (**self).load(definition)
    }
}

// ============================================================================
// SECTION: Clock
// ============================================================================

/// Timestamp source for run records.
pub trait Clock {
    /// Returns the current time.
    fn now(&self) -> Timestamp;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

// ============================================================================
// SECTION: Run Observer
// ============================================================================

/// Receives run progress notifications.
///
/// All methods default to no-ops so observers implement only what they need.
pub trait RunObserver {
    /// Called once before the first test runs.
    fn on_suite_started(&self, _suite: &SuiteSpec, _at: Timestamp) {}

    /// Called for each unavailable source a test references.
    fn on_source_unavailable(
        &self,
        _test: &TestName,
        _unavailable: &SourceUnavailable,
        _at: Timestamp,
    ) {
    }

    /// Called after each test entry is recorded.
    fn on_test_completed(&self, _entry: &TestEntry) {}

    /// Called once with the finished record.
    fn on_suite_completed(&self, _record: &TestRunRecord) {}
}
