// crates/check-gate-cli/src/i18n.rs
// ============================================================================
// Module: CLI Message Catalog
// Description: Provides the message catalog and translation helpers.
// Purpose: Centralize user-facing strings of the CLI.
// Dependencies: Standard library collections.
// ============================================================================

//! ## Overview
//! Every line the CLI prints, other than core-rendered report lines, is a
//! catalog entry looked up through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to the key itself.
//! - Placeholder substitutions preserve argument order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A formatted message argument captured by the [`macro@crate::t`] macro.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `path`).
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries.
pub(crate) const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "check-gate {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid: {tests} tests, {sources} sources."),
    ("run.providers_failed", "Failed to initialize source providers: {error}"),
    ("run.audit_failed", "Failed to open audit log {path}: {error}"),
    ("run.banner", "🔍 {suite} ({tests} tests)"),
    ("run.results.header", "📊 {suite} RESULTS"),
    ("run.outcome.passed", "🎯 OVERALL STATUS: ✅ PASSED"),
    ("run.outcome.degraded", "🎯 OVERALL STATUS: ⚠️ DEGRADED"),
    ("run.outcome.failed", "🎯 OVERALL STATUS: ❌ FAILED"),
    ("report.serialize_failed", "Failed to serialize test results: {error}"),
    ("report.write_failed", "Failed to write test results to {path}: {error}"),
    ("report.saved", "💾 Test results saved to: {path}"),
];

/// Returns the message catalog.
pub(crate) fn catalog() -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect())
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Looks up `key` and substitutes `args` into its placeholders.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog().get(key).copied().unwrap_or(key);
    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a catalog message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
