// crates/check-gate-core/tests/common/mod.rs
// ============================================================================
// Module: Core Test Fixtures
// Description: In-memory loaders, clocks and observers for runtime tests.
// ============================================================================

//! Shared fixtures for core integration tests.

#![allow(dead_code, reason = "Each test binary uses a different subset of fixtures.")]

use std::cell::Cell;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use check_gate_core::Clock;
use check_gate_core::RunObserver;
use check_gate_core::SourceBlob;
use check_gate_core::SourceDefinition;
use check_gate_core::SourceLoader;
use check_gate_core::SourceName;
use check_gate_core::SourceSet;
use check_gate_core::SourceSpec;
use check_gate_core::SourceUnavailable;
use check_gate_core::SuiteSpec;
use check_gate_core::TestEntry;
use check_gate_core::TestName;
use check_gate_core::TestRunRecord;
use check_gate_core::Timestamp;
use check_gate_core::UnavailableReason;

/// Loader backed by an in-memory map; unknown sources are `not_found`.
#[derive(Default)]
pub struct MapLoader {
    pub texts: BTreeMap<String, String>,
    pub panic_on: Option<String>,
}

impl MapLoader {
    pub fn with(mut self, name: &str, text: &str) -> Self {
        self.texts.insert(name.to_string(), text.to_string());
        self
    }

    pub fn panicking_on(mut self, name: &str) -> Self {
        self.panic_on = Some(name.to_string());
        self
    }
}

impl SourceLoader for MapLoader {
    fn load(&self, definition: &SourceDefinition) -> Result<SourceBlob, SourceUnavailable> {
        let name = definition.name.as_str();
        if self.panic_on.as_deref() == Some(name) {
            panic!("loader exploded on {name}");
        }
        let location = definition.spec.location();
        self.texts.get(name).map_or_else(
            || {
                Err(SourceUnavailable::new(name, location.clone(), UnavailableReason::NotFound)
                    .with_message("no such file"))
            },
            |text| Ok(SourceBlob::new(location.clone(), text.clone())),
        )
    }
}

/// Clock that advances one second per call.
pub struct StepClock {
    next: Cell<i64>,
}

impl StepClock {
    pub const fn starting_at(millis: i64) -> Self {
        Self {
            next: Cell::new(millis),
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> Timestamp {
        let value = self.next.get();
        self.next.set(value + 1_000);
        Timestamp::from_unix_millis(value)
    }
}

/// Observer that records event labels in order.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    pub events: Arc<Mutex<Vec<String>>>,
}

impl RunObserver for RecordingObserver {
    fn on_suite_started(&self, suite: &SuiteSpec, _at: Timestamp) {
        self.events.lock().unwrap().push(format!("started:{}", suite.name));
    }

    fn on_source_unavailable(
        &self,
        test: &TestName,
        unavailable: &SourceUnavailable,
        _at: Timestamp,
    ) {
        self.events.lock().unwrap().push(format!("unavailable:{test}:{}", unavailable.source));
    }

    fn on_test_completed(&self, entry: &TestEntry) {
        self.events.lock().unwrap().push(format!("completed:{}:{}", entry.name, entry.status));
    }

    fn on_suite_completed(&self, record: &TestRunRecord) {
        self.events.lock().unwrap().push(format!("finished:{}", record.exit_code));
    }
}

/// Declares a file source named `name`.
pub fn file_source(name: &str, path: &str) -> SourceDefinition {
    SourceDefinition {
        name: SourceName::new(name),
        spec: SourceSpec::File {
            path: path.into(),
        },
    }
}

/// Builds a source set with the given loaded texts.
pub fn source_set(texts: &[(&str, &str)]) -> SourceSet {
    let mut set = SourceSet::new();
    for (name, text) in texts {
        set.insert_blob(*name, SourceBlob::new(format!("{name}.js"), *text));
    }
    set
}

/// Adds a `not_found` source to a set.
pub fn with_missing(mut set: SourceSet, name: &str, location: &str) -> SourceSet {
    set.insert_unavailable(SourceUnavailable::new(name, location, UnavailableReason::NotFound));
    set
}
