// crates/check-gate-core/src/lib.rs
// ============================================================================
// Module: Check Gate Core
// Description: Heuristic verification and scoring engine for source checks.
// Purpose: Evaluate named check tables into PASS/WARN/FAIL verdicts and records.
// Dependencies: jsonpath_lib, regex, serde, serde_json, serde_yaml, sha2, time
// ============================================================================

//! ## Overview
//! Check Gate inspects text sources (files, `.env` values, HTTP responses) with
//! named predicates, classifies each test under an explicit verdict policy,
//! and summarizes the suite under an explicit suite policy. This crate holds
//! the model and the pure pipeline; loading and presentation live in host
//! crates behind [`interfaces`].
//! Invariants:
//! - Verdicts depend only on check results, loaded text and policy.
//! - A missing source fails its checks and is named in the details.
//! - One test's failure or panic never aborts the remaining tests.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::Clock;
pub use interfaces::RunObserver;
pub use interfaces::SourceLoader;
pub use runtime::AuditEvent;
pub use runtime::AuditObserver;
pub use runtime::AuditSink;
pub use runtime::EvaluationError;
pub use runtime::FileAuditSink;
pub use runtime::StderrAuditSink;
pub use runtime::SuiteRunner;

#[cfg(test)]
mod tests;
