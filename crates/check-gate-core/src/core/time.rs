// crates/check-gate-core/src/core/time.rs
// ============================================================================
// Module: Check Gate Time Model
// Description: Canonical timestamp representation for run records and logs.
// Purpose: Keep run records deterministic by taking time from callers.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Check Gate stamps every test entry and audit event with an explicit time
//! value. The core never reads the wall clock; hosts supply timestamps
//! through a [`Clock`](crate::interfaces::Clock). Timestamps serialize as
//! RFC 3339 UTC strings so reports stay readable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as _;
use serde::ser::Error as _;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Canonical timestamp used in run records and audit events.
///
/// # Invariants
/// - Values are explicitly provided by callers; the core never reads wall-clock time.
/// - Stored as unix epoch milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from unix epoch milliseconds.
    #[must_use]
    pub const fn from_unix_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Converts to an [`OffsetDateTime`] in UTC, if the value is in range.
    fn to_datetime(self) -> Option<OffsetDateTime> {
        let nanos = i128::from(self.0).checked_mul(1_000_000)?;
        OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()
    }

    /// Formats the timestamp as RFC 3339.
    ///
    /// Returns `None` when the value is outside the representable range.
    #[must_use]
    pub fn to_rfc3339(self) -> Option<String> {
        self.to_datetime()?.format(&Rfc3339).ok()
    }

    /// Parses an RFC 3339 timestamp.
    #[must_use]
    pub fn parse_rfc3339(value: &str) -> Option<Self> {
        let parsed = OffsetDateTime::parse(value, &Rfc3339).ok()?;
        let millis = parsed.unix_timestamp_nanos() / 1_000_000;
        i64::try_from(millis).ok().map(Self)
    }
}

impl fmt::Display for Timestamp {
    /// Renders as `YYYY-MM-DD HH:MM:SS` (UTC), falling back to raw millis.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
        match self.to_datetime().and_then(|value| value.format(layout).ok()) {
            Some(text) => f.write_str(&text),
            None => write!(f, "{}ms", self.0),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = self.to_rfc3339().ok_or_else(|| S::Error::custom("timestamp out of range"))?;
        serializer.serialize_str(&text)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse_rfc3339(&text).ok_or_else(|| D::Error::custom("invalid rfc3339 timestamp"))
    }
}
