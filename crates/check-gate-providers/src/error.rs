// crates/check-gate-providers/src/error.rs
// ============================================================================
// Module: Source Provider Errors
// Description: Error taxonomy shared by file, env-file and HTTP providers.
// Purpose: Classify load failures into stable unavailability reasons.
// Dependencies: check-gate-core, thiserror
// ============================================================================

//! ## Overview
//! Providers return [`SourceError`]; the registry converts each error into a
//! core [`SourceUnavailable`] diagnostic so the runner can attribute failing
//! checks to the exact source and reason. Messages never include secret values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use check_gate_core::SourceName;
use check_gate_core::SourceUnavailable;
use check_gate_core::UnavailableReason;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Source provider errors.
///
/// # Invariants
/// - Variants map one-to-one onto [`UnavailableReason`] labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// File does not exist.
    #[error("file not found: {0}")]
    NotFound(String),
    /// File exists but could not be opened or read.
    #[error("unable to read {0}")]
    Unreadable(String),
    /// Content exceeds the configured limit.
    #[error("content exceeds size limit of {limit} bytes")]
    TooLarge {
        /// Configured limit in bytes.
        limit: usize,
    },
    /// Content is not valid UTF-8.
    #[error("content is not valid utf-8")]
    NotUtf8,
    /// Requested key is absent from a `.env` file.
    #[error("key {0} not found")]
    KeyMissing(String),
    /// Path resolves outside the configured root.
    #[error("path escapes root: {0}")]
    EscapesRoot(String),
    /// HTTP request could not be completed.
    #[error("http request failed: {0}")]
    RequestFailed(String),
    /// HTTP response status differs from the expected status.
    #[error("unexpected http status {actual}, expected {expected}")]
    UnexpectedStatus {
        /// Received status.
        actual: u16,
        /// Expected status.
        expected: u16,
    },
}

impl SourceError {
    /// Returns the unavailability reason for this error.
    #[must_use]
    pub const fn reason(&self) -> UnavailableReason {
        match self {
            Self::NotFound(_) => UnavailableReason::NotFound,
            Self::Unreadable(_) => UnavailableReason::Unreadable,
            Self::TooLarge {
                ..
            } => UnavailableReason::TooLarge,
            Self::NotUtf8 => UnavailableReason::NotUtf8,
            Self::KeyMissing(_) => UnavailableReason::KeyMissing,
            Self::EscapesRoot(_) => UnavailableReason::EscapesRoot,
            Self::RequestFailed(_) => UnavailableReason::RequestFailed,
            Self::UnexpectedStatus {
                ..
            } => UnavailableReason::UnexpectedStatus,
        }
    }

    /// Converts the error into a core diagnostic for `source`.
    #[must_use]
    pub fn into_unavailable(self, source: SourceName, location: String) -> SourceUnavailable {
        let reason = self.reason();
        SourceUnavailable::new(source, location, reason).with_message(self.to_string())
    }
}
