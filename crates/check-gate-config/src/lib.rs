// crates/check-gate-config/src/lib.rs
// ============================================================================
// Module: Check Gate Config Library
// Description: Suite configuration model, validation and examples.
// Purpose: Single source of truth for check-gate.toml semantics.
// Dependencies: check-gate-core, check-gate-providers, serde, toml
// ============================================================================

//! ## Overview
//! `check-gate-config` loads a `check-gate.toml` suite file, validates it
//! strictly and fail-closed, and turns it into a core
//! [`SuiteSpec`](check_gate_core::SuiteSpec) plus provider settings.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
