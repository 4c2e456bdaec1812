// crates/check-gate-cli/src/report.rs
// ============================================================================
// Module: Report Persistence
// Description: Writes the run record as a pretty-printed JSON document.
// Purpose: Persist results for downstream tooling.
// Dependencies: check-gate-core, crate::i18n
// ============================================================================

//! ## Overview
//! The report is written once, after the run, creating missing parent
//! directories. Failures are returned as catalog messages; the caller maps
//! them to the run-error exit code.

use std::fs;
use std::path::Path;

use check_gate_core::TestRunRecord;

use crate::t;

/// Writes `record` to `path`.
///
/// # Errors
///
/// Returns a user-facing message when serialization or the write fails.
pub fn write_report(path: &Path, record: &TestRunRecord) -> Result<(), String> {
    let payload = record
        .to_json_pretty()
        .map_err(|err| t!("report.serialize_failed", error = err))?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .map_err(|err| t!("report.write_failed", path = path.display(), error = err))?;
    }
    fs::write(path, format!("{payload}\n"))
        .map_err(|err| t!("report.write_failed", path = path.display(), error = err))
}
