// crates/check-gate-providers/src/env_file.rs
// ============================================================================
// Module: Env File Source Provider
// Description: Extracts a single key from a `.env`-style file.
// Purpose: Supply bot tokens and URLs without reading the process environment.
// Dependencies: crate::{error, file}
// ============================================================================

//! ## Overview
//! `.env` files are read through the [`FileProvider`] so the same root and
//! size limits apply. Parsing is deliberately minimal: blank lines and lines
//! starting with `#` are skipped, each remaining line is split on its first
//! `=`, and the first line whose trimmed key matches wins. Surrounding quotes
//! are stripped from the value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use crate::error::SourceError;
use crate::file::FileProvider;

// ============================================================================
// SECTION: Provider Implementation
// ============================================================================

/// Reads single values from `.env`-style files.
#[derive(Debug, Clone)]
pub struct EnvFileProvider {
    /// File reader enforcing root and size limits.
    files: FileProvider,
}

impl EnvFileProvider {
    /// Creates a provider reading through `files`.
    #[must_use]
    pub const fn new(files: FileProvider) -> Self {
        Self {
            files,
        }
    }

    /// Returns the value of `key` from the `.env` file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the file cannot be read or the key is absent.
    pub fn read_value(&self, path: &Path, key: &str) -> Result<String, SourceError> {
        let text = self.files.read_text(path)?;
        find_env_value(&text, key).ok_or_else(|| SourceError::KeyMissing(key.to_string()))
    }
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Finds the first value for `key` in `.env` text.
#[must_use]
pub fn find_env_value(text: &str, key: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .find(|(candidate, _)| candidate.trim() == key)
        .map(|(_, value)| value.trim().trim_matches(['"', '\'']).to_string())
}
