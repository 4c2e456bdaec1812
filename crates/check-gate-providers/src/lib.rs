// crates/check-gate-providers/src/lib.rs
// ============================================================================
// Module: Check Gate Providers
// Description: Built-in source providers and the registry loader.
// Purpose: Turn source declarations into text blobs with strict limits.
// Dependencies: check-gate-core, reqwest, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This crate ships the built-in source providers (file, multi-file, `.env`
//! value, HTTP) and a registry implementing the core
//! [`SourceLoader`](check_gate_core::SourceLoader). Providers fail closed:
//! missing, oversized, non-UTF-8 or out-of-root inputs are reported as
//! unavailable sources, never as panics.
//! Invariants:
//! - Each load performs at most one file read per path or one HTTP request.
//! - Substituted secrets never appear in locations or error messages.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod env_file;
pub mod error;
pub mod file;
pub mod http;
pub mod registry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use env_file::EnvFileProvider;
pub use env_file::find_env_value;
pub use error::SourceError;
pub use file::FileProvider;
pub use file::FileProviderConfig;
pub use http::HttpProvider;
pub use http::HttpProviderConfig;
pub use http::HttpRequest;
pub use registry::ProviderConfigs;
pub use registry::SECRET_PLACEHOLDER;
pub use registry::SourceRegistry;

#[cfg(test)]
mod tests;
