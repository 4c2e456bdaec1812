// crates/check-gate-core/src/runtime/report.rs
// ============================================================================
// Module: Console Report Rendering
// Description: Human-readable lines for test entries and suite summaries.
// Purpose: Render run records without performing any I/O.
// Dependencies: crate::core, serde_json
// ============================================================================

//! ## Overview
//! Rendering returns lines; hosts decide where they go. Each test renders as
//! one status line with a glyph followed by one indented line per details
//! key, in key order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::core::CheckOutcome;
use crate::core::CheckResult;
use crate::core::SourceName;
use crate::core::SuiteSummary;
use crate::core::TestEntry;
use crate::core::TestStatus;

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Indentation applied to detail lines.
pub const DETAIL_INDENT: &str = "   ";

/// Returns the console glyph for a status.
#[must_use]
pub const fn status_glyph(status: TestStatus) -> &'static str {
    match status {
        TestStatus::Pass => "✅",
        TestStatus::Fail => "❌",
        TestStatus::Warn => "⚠️",
    }
}

/// Renders a test entry as a status line plus indented detail lines.
#[must_use]
pub fn render_entry(entry: &TestEntry) -> Vec<String> {
    let mut lines = Vec::with_capacity(entry.details.len() + 1);
    lines.push(format!("{} {}: {}", status_glyph(entry.status), entry.name, entry.message));
    for (key, value) in &entry.details {
        lines.push(format!("{DETAIL_INDENT}{key}: {}", render_value(value)));
    }
    lines
}

/// Renders one check result as an indented line.
#[must_use]
pub fn render_check(result: &CheckResult) -> String {
    let mark = if result.passed { "✓" } else { "✗" };
    match &result.outcome {
        CheckOutcome::SourceUnavailable {
            sources,
        } => {
            let names: Vec<&str> = sources.iter().map(SourceName::as_str).collect();
            let names = names.join(", ");
            format!("{DETAIL_INDENT}{mark} {} (source unavailable: {names})", result.name)
        }
        CheckOutcome::Satisfied | CheckOutcome::Unsatisfied => {
            format!("{DETAIL_INDENT}{mark} {}", result.name)
        }
    }
}

/// Renders the suite counters block.
#[must_use]
pub fn render_summary(summary: &SuiteSummary) -> Vec<String> {
    vec![
        format!("Total tests: {}", summary.total),
        format!("Passed: {}", summary.passed),
        format!("Failed: {}", summary.failed),
        format!("Warnings: {}", summary.warned),
        format!("Success rate: {:.1}%", summary.success_rate),
    ]
}

/// Renders a details value on a single line.
///
/// Strings render bare, arrays join their items, per-check objects render as
/// `name ✓`/`name ✗`, other objects render as `key=value` pairs.
#[must_use]
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => {
            if items.is_empty() {
                return "none".to_string();
            }
            let separator = if items.iter().any(Value::is_object) { "; " } else { ", " };
            items.iter().map(render_value).collect::<Vec<_>>().join(separator)
        }
        Value::Object(map) => {
            if let (Some(Value::String(name)), Some(Value::Bool(passed))) =
                (map.get("name"), map.get("passed"))
            {
                let mark = if *passed { "✓" } else { "✗" };
                return format!("{name} {mark}");
            }
            map.iter()
                .map(|(key, value)| format!("{key}={}", render_value(value)))
                .collect::<Vec<_>>()
                .join(", ")
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => value.to_string(),
    }
}
