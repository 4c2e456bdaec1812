// crates/check-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Check Gate Runtime
// Description: Evaluation, aggregation, rendering and execution of suites.
// Purpose: Turn a suite specification into a deterministic run record.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The runtime is a linear pipeline: load sources, evaluate checks, aggregate
//! a verdict, record the entry. [`SuiteRunner`] drives it; the other modules
//! are pure functions usable on their own.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod aggregator;
pub mod audit;
pub mod evaluator;
pub mod report;
pub mod runner;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use aggregator::aggregate;
pub use aggregator::classify;
pub use aggregator::summarize;
pub use aggregator::suite_outcome;
pub use audit::AuditEvent;
pub use audit::AuditObserver;
pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::StderrAuditSink;
pub use evaluator::EvaluationError;
pub use evaluator::count_occurrences;
pub use evaluator::evaluate_checks;
pub use report::render_entry;
pub use report::status_glyph;
pub use runner::SuiteRunner;
