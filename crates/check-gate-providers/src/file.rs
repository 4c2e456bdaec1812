// crates/check-gate-providers/src/file.rs
// ============================================================================
// Module: File Source Provider
// Description: Root-confined, size-limited UTF-8 file reads.
// Purpose: Load the text blobs checks inspect, failing closed on bad inputs.
// Dependencies: crate::error
// ============================================================================

//! ## Overview
//! The file provider resolves paths against an optional root, refuses paths
//! that escape it, and reads at most `max_bytes` bytes. Files are opened,
//! read to completion and closed within a single call.
//! Multi-file sources concatenate every listed file that exists, in order,
//! separated by a newline; they fail only when none of the files exist.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::ErrorKind;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::SourceError;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default maximum file size, in bytes.
pub const DEFAULT_MAX_FILE_BYTES: usize = 4 * 1024 * 1024;

/// Configuration for the file provider.
///
/// # Invariants
/// - When `root` is set, every resolved path must stay inside it.
/// - `max_bytes` is a hard upper bound on bytes read per file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileProviderConfig {
    /// Optional root directory for resolving and confining paths.
    pub root: Option<PathBuf>,
    /// Maximum file size allowed, in bytes.
    pub max_bytes: usize,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            root: None,
            max_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

// ============================================================================
// SECTION: Provider Implementation
// ============================================================================

/// Reads UTF-8 text files under the configured limits.
#[derive(Debug, Clone)]
pub struct FileProvider {
    /// Provider configuration.
    config: FileProviderConfig,
}

impl FileProvider {
    /// Creates a file provider.
    #[must_use]
    pub const fn new(config: FileProviderConfig) -> Self {
        Self {
            config,
        }
    }

    /// Reads one file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the file is missing, escapes the root,
    /// cannot be read, exceeds the size limit, or is not UTF-8.
    pub fn read_text(&self, path: &Path) -> Result<String, SourceError> {
        let resolved = self.resolve(path)?;
        let bytes = read_file_limited(&resolved, self.config.max_bytes)?;
        String::from_utf8(bytes).map_err(|_| SourceError::NotUtf8)
    }

    /// Reads and concatenates every listed file that exists.
    ///
    /// # Errors
    ///
    /// Returns the first [`SourceError`] when no file could be read, or any
    /// error other than "not found" for a file that exists.
    pub fn read_concatenated(&self, paths: &[PathBuf]) -> Result<String, SourceError> {
        let mut parts = Vec::with_capacity(paths.len());
        let mut first_missing = None;
        for path in paths {
            match self.read_text(path) {
                Ok(text) => parts.push(text),
                Err(err @ SourceError::NotFound(_)) => {
                    if first_missing.is_none() {
                        first_missing = Some(err);
                    }
                }
                Err(err) => return Err(err),
            }
        }
        if parts.is_empty() {
            return Err(first_missing
                .unwrap_or_else(|| SourceError::NotFound("no files listed".to_string())));
        }
        Ok(parts.join("\n"))
    }

    /// Resolves a path against the configured root policy.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the path does not exist or escapes the root.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf, SourceError> {
        let Some(root) = &self.config.root else {
            return canonicalize_existing(path);
        };
        let root = root
            .canonicalize()
            .map_err(|_| SourceError::Unreadable(format!("root {}", root.display())))?;
        let joined = if path.is_absolute() { path.to_path_buf() } else { root.join(path) };
        let resolved = canonicalize_existing(&joined)?;
        if !resolved.starts_with(&root) {
            return Err(SourceError::EscapesRoot(path.display().to_string()));
        }
        Ok(resolved)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Canonicalizes a path, classifying missing files separately.
fn canonicalize_existing(path: &Path) -> Result<PathBuf, SourceError> {
    path.canonicalize().map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            SourceError::NotFound(path.display().to_string())
        } else {
            SourceError::Unreadable(path.display().to_string())
        }
    })
}

/// Reads a file while enforcing a maximum byte limit.
fn read_file_limited(path: &Path, max_bytes: usize) -> Result<Vec<u8>, SourceError> {
    let unreadable = || SourceError::Unreadable(path.display().to_string());
    let file = File::open(path).map_err(|_| unreadable())?;
    let limit = u64::try_from(max_bytes.saturating_add(1)).map_err(|_| SourceError::TooLarge {
        limit: max_bytes,
    })?;
    let mut buf = Vec::new();
    file.take(limit).read_to_end(&mut buf).map_err(|_| unreadable())?;
    if buf.len() > max_bytes {
        return Err(SourceError::TooLarge {
            limit: max_bytes,
        });
    }
    Ok(buf)
}
