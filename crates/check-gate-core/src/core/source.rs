// crates/check-gate-core/src/core/source.rs
// ============================================================================
// Module: Source Model
// Description: Declarations and loaded forms of the text blobs checks inspect.
// Purpose: Separate "source unavailable" from "predicate false" explicitly.
// Dependencies: crate::core::{hashing, identifiers}, serde
// ============================================================================

//! ## Overview
//! Sources are declared once per suite and referenced by name from checks.
//! Loading is performed by a [`SourceLoader`](crate::interfaces::SourceLoader)
//! and yields either a [`SourceBlob`] or a [`SourceUnavailable`] diagnostic.
//! The evaluator never sees I/O errors directly; it only sees this split.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::core::hashing::DEFAULT_HASH_ALGORITHM;
use crate::core::hashing::HashDigest;
use crate::core::hashing::hash_bytes;
use crate::core::identifiers::SourceName;

// ============================================================================
// SECTION: Source Declarations
// ============================================================================

/// Named source declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDefinition {
    /// Logical source name referenced by checks.
    pub name: SourceName,
    /// How the source text is obtained.
    #[serde(flatten)]
    pub spec: SourceSpec,
}

/// Source acquisition strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceSpec {
    /// A single UTF-8 text file.
    File {
        /// File path, relative paths resolve against the suite root.
        path: PathBuf,
    },
    /// Concatenation of every listed file that exists, in order.
    Files {
        /// Candidate file paths.
        paths: Vec<PathBuf>,
    },
    /// The value of one key from a `.env`-style file.
    EnvValue {
        /// Path to the `.env` file.
        path: PathBuf,
        /// Key whose value becomes the source text.
        key: String,
    },
    /// The response body of a single HTTP request.
    Http {
        /// URL template; `{secret}` is substituted when `secret` is set.
        url: String,
        /// Request method.
        #[serde(default)]
        method: HttpMethod,
        /// Optional JSON request body (POST only).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        body: Option<serde_json::Value>,
        /// Expected response status.
        #[serde(default = "default_expect_status")]
        expect_status: u16,
        /// Optional secret substituted into the URL.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        secret: Option<SecretRef>,
    },
}

impl SourceSpec {
    /// Returns a human-readable location that never contains secret values.
    #[must_use]
    pub fn location(&self) -> String {
        match self {
            Self::File {
                path,
            }
            | Self::EnvValue {
                path, ..
            } => path.display().to_string(),
            Self::Files {
                paths,
            } => paths.iter().map(|path| path.display().to_string()).collect::<Vec<_>>().join(", "),
            Self::Http {
                url, ..
            } => url.clone(),
        }
    }
}

/// HTTP request methods supported by HTTP sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HttpMethod {
    /// GET request.
    #[default]
    Get,
    /// POST request with an optional JSON body.
    Post,
}

/// Reference to a secret value stored in a `.env`-style file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRef {
    /// Path to the `.env` file.
    pub path: PathBuf,
    /// Key holding the secret.
    pub key: String,
}

/// Default expected status for HTTP sources.
const fn default_expect_status() -> u16 {
    200
}

// ============================================================================
// SECTION: Loaded Sources
// ============================================================================

/// Loaded text of one source.
///
/// # Invariants
/// - `digest` is the SHA-256 of `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBlob {
    /// Where the text came from (never contains secrets).
    pub location: String,
    /// Loaded UTF-8 text.
    pub text: String,
    /// Content digest of `text`.
    pub digest: HashDigest,
}

impl SourceBlob {
    /// Builds a blob and computes its digest.
    #[must_use]
    pub fn new(location: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let digest = hash_bytes(DEFAULT_HASH_ALGORITHM, text.as_bytes());
        Self {
            location: location.into(),
            text,
            digest,
        }
    }
}

/// Reason a source could not be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// File does not exist.
    NotFound,
    /// File exists but could not be read.
    Unreadable,
    /// Content exceeds the configured size limit.
    TooLarge,
    /// Content is not valid UTF-8.
    NotUtf8,
    /// Requested `.env` key is absent.
    KeyMissing,
    /// Path resolves outside the suite root.
    EscapesRoot,
    /// HTTP request failed (connect, timeout, body read).
    RequestFailed,
    /// HTTP response status differs from the expected status.
    UnexpectedStatus,
}

impl UnavailableReason {
    /// Returns the stable label for the reason.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Unreadable => "unreadable",
            Self::TooLarge => "too_large",
            Self::NotUtf8 => "not_utf8",
            Self::KeyMissing => "key_missing",
            Self::EscapesRoot => "escapes_root",
            Self::RequestFailed => "request_failed",
            Self::UnexpectedStatus => "unexpected_status",
        }
    }
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic for a source that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceUnavailable {
    /// Source name.
    pub source: SourceName,
    /// Location that was attempted.
    pub location: String,
    /// Classified reason.
    pub reason: UnavailableReason,
    /// Underlying error text, captured verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SourceUnavailable {
    /// Builds a diagnostic without an underlying message.
    #[must_use]
    pub fn new(
        source: impl Into<SourceName>,
        location: impl Into<String>,
        reason: UnavailableReason,
    ) -> Self {
        Self {
            source: source.into(),
            location: location.into(),
            reason,
            message: None,
        }
    }

    /// Attaches the underlying error message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl fmt::Display for SourceUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.source, self.location, self.reason)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Source Set
// ============================================================================

/// Loaded sources for one test evaluation.
///
/// # Invariants
/// - Each name maps to exactly one load outcome.
/// - Names absent from the set are treated as unavailable by the evaluator.
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    /// Load outcome per source name.
    entries: BTreeMap<SourceName, Result<SourceBlob, SourceUnavailable>>,
}

impl SourceSet {
    /// Creates an empty source set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Records a loaded blob.
    pub fn insert_blob(&mut self, name: impl Into<SourceName>, blob: SourceBlob) {
        self.entries.insert(name.into(), Ok(blob));
    }

    /// Records an unavailable source.
    pub fn insert_unavailable(&mut self, unavailable: SourceUnavailable) {
        self.entries.insert(unavailable.source.clone(), Err(unavailable));
    }

    /// Records a load outcome.
    pub fn insert(&mut self, name: SourceName, outcome: Result<SourceBlob, SourceUnavailable>) {
        self.entries.insert(name, outcome);
    }

    /// Returns the loaded text for `name`, if available.
    #[must_use]
    pub fn blob(&self, name: &SourceName) -> Option<&SourceBlob> {
        self.entries.get(name).and_then(|entry| entry.as_ref().ok())
    }

    /// Returns true when `name` loaded successfully.
    #[must_use]
    pub fn is_available(&self, name: &SourceName) -> bool {
        self.blob(name).is_some()
    }

    /// Returns diagnostics for every unavailable source, in name order.
    #[must_use]
    pub fn unavailable(&self) -> Vec<&SourceUnavailable> {
        self.entries.values().filter_map(|entry| entry.as_ref().err()).collect()
    }

    /// Returns `(name, digest)` for every loaded source, in name order.
    #[must_use]
    pub fn digests(&self) -> Vec<(&SourceName, &HashDigest)> {
        self.entries
            .iter()
            .filter_map(|(name, entry)| entry.as_ref().ok().map(|blob| (name, &blob.digest)))
            .collect()
    }
}
