// crates/check-gate-providers/tests/proptest_env.rs
// ============================================================================
// Module: Env Parsing Property Tests
// Description: Property-based checks for `.env` value lookup.
// ============================================================================

//! ## Overview
//! Generates `.env` texts and checks that lookups are exact and total.

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

use check_gate_providers::find_env_value;
use proptest::prelude::*;

proptest! {
    #[test]
    fn finds_value_among_other_keys(
        key in "[A-Z][A-Z0-9_]{0,15}",
        value in "[a-zA-Z0-9:/._-]{0,32}",
        others in prop::collection::vec(("[a-z][a-z0-9_]{0,8}", "[a-z0-9]{0,8}"), 0 .. 6),
    ) {
        let mut lines: Vec<String> = others.iter().map(|(k, v)| format!("{k}={v}")).collect();
        lines.push(format!("# {key}=commented"));
        lines.push(format!("{key}={value}"));
        let text = lines.join("\n");
        prop_assert_eq!(find_env_value(&text, &key), Some(value));
    }

    #[test]
    fn arbitrary_text_never_panics(text in ".{0,256}", key in "[A-Z_]{1,8}") {
        let _ = find_env_value(&text, &key);
    }

    #[test]
    fn quotes_are_stripped(value in "[a-z0-9]{1,16}") {
        let text = format!("TOKEN='{value}'\nOTHER=\"{value}\"");
        prop_assert_eq!(find_env_value(&text, "TOKEN"), Some(value.clone()));
        prop_assert_eq!(find_env_value(&text, "OTHER"), Some(value));
    }
}
