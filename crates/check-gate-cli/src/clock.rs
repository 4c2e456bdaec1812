// crates/check-gate-cli/src/clock.rs
// ============================================================================
// Module: System Clock
// Description: Wall-clock implementation of the core clock interface.
// Purpose: Stamp run records with real time at the CLI boundary only.
// Dependencies: check-gate-core
// ============================================================================

//! ## Overview
//! The core never reads the wall clock; the CLI supplies [`SystemClock`].

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use check_gate_core::Clock;
use check_gate_core::Timestamp;

/// Clock reading the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX));
        Timestamp::from_unix_millis(millis)
    }
}
