// crates/check-gate-providers/src/tests.rs
// ============================================================================
// Module: Providers Unit Tests
// Description: Parsing and error-classification tests for provider internals.
// Purpose: Allow panic-based assertions while covering private helpers.
// Dependencies: check-gate-providers
// ============================================================================

//! ## Overview
//! Unit tests for `.env` parsing and error-to-reason mapping.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Tests
// ============================================================================

use check_gate_core::SourceName;
use check_gate_core::UnavailableReason;

use crate::env_file::find_env_value;
use crate::error::SourceError;

#[test]
fn env_value_skips_comments_and_strips_quotes() {
    let text = "# TELEGRAM_BOT_TOKEN=commented\n\nOTHER=1\nTELEGRAM_BOT_TOKEN=\"123:abc\"\n";
    assert_eq!(find_env_value(text, "TELEGRAM_BOT_TOKEN").as_deref(), Some("123:abc"));
}

#[test]
fn env_value_splits_on_first_equals_and_takes_first_match() {
    let text = "URL=https://x.test/?a=b\nURL=second\n";
    assert_eq!(find_env_value(text, "URL").as_deref(), Some("https://x.test/?a=b"));
}

#[test]
fn env_value_matches_whole_keys_only() {
    let text = "TELEGRAM_BOT_TOKEN_OLD=old\nSINGLE='quoted'\n";
    assert_eq!(find_env_value(text, "TELEGRAM_BOT_TOKEN"), None);
    assert_eq!(find_env_value(text, "SINGLE").as_deref(), Some("quoted"));
}

#[test]
fn errors_map_to_stable_reasons() {
    let cases = [
        (SourceError::NotFound("a".to_string()), UnavailableReason::NotFound),
        (SourceError::EscapesRoot("../a".to_string()), UnavailableReason::EscapesRoot),
        (SourceError::KeyMissing("K".to_string()), UnavailableReason::KeyMissing),
        (
            SourceError::UnexpectedStatus {
                actual: 401,
                expected: 200,
            },
            UnavailableReason::UnexpectedStatus,
        ),
    ];
    for (error, reason) in cases {
        assert_eq!(error.reason(), reason);
    }
}

#[test]
fn unavailable_carries_error_message() {
    let unavailable = SourceError::TooLarge {
        limit: 10,
    }
    .into_unavailable(SourceName::new("bot"), "bot.js".to_string());
    assert_eq!(unavailable.reason, UnavailableReason::TooLarge);
    assert_eq!(unavailable.message.as_deref(), Some("content exceeds size limit of 10 bytes"));
    assert_eq!(unavailable.location, "bot.js");
}
