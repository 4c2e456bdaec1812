// crates/check-gate-cli/src/lib.rs
// ============================================================================
// Module: Check Gate CLI Library
// Description: Shared helpers for the Check Gate command-line interface.
// Purpose: Provide reusable components for the CLI binary and tests.
// Dependencies: check-gate-core
// ============================================================================

//! ## Overview
//! This library houses the message catalog, the wall clock, the console
//! transcript observer and report persistence. The binary entry point
//! (`src/main.rs`) wires them to the configured suite.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod clock;
pub mod console;
/// Message catalog.
pub mod i18n;
pub mod report;

#[cfg(test)]
mod tests;
