// crates/check-gate-providers/src/registry.rs
// ============================================================================
// Module: Source Registry
// Description: Routes source declarations to the matching provider.
// Purpose: Implement the core source loader over built-in providers.
// Dependencies: crate::{env_file, error, file, http}, check-gate-core
// ============================================================================

//! ## Overview
//! [`SourceRegistry`] owns one instance of each built-in provider and
//! implements [`SourceLoader`]. Every provider error is converted to a
//! [`SourceUnavailable`] carrying the declared location, so diagnostics name
//! the file or URL template that failed without exposing substituted secrets.

// ============================================================================
// SECTION: Imports
// ============================================================================

use check_gate_core::SourceBlob;
use check_gate_core::SourceDefinition;
use check_gate_core::SourceLoader;
use check_gate_core::SourceSpec;
use check_gate_core::SourceUnavailable;

use crate::env_file::EnvFileProvider;
use crate::error::SourceError;
use crate::file::FileProvider;
use crate::file::FileProviderConfig;
use crate::http::HttpProvider;
use crate::http::HttpProviderConfig;
use crate::http::HttpRequest;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Placeholder replaced by the secret value in HTTP URL templates.
pub const SECRET_PLACEHOLDER: &str = "{secret}";

/// Configuration bundle for the built-in providers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderConfigs {
    /// File provider configuration (also used for `.env` files).
    pub file: FileProviderConfig,
    /// HTTP provider configuration.
    pub http: HttpProviderConfig,
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Source loader backed by the built-in providers.
pub struct SourceRegistry {
    /// File reader.
    files: FileProvider,
    /// `.env` value reader.
    env: EnvFileProvider,
    /// HTTP fetcher.
    http: HttpProvider,
}

impl SourceRegistry {
    /// Builds a registry from provider configurations.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the HTTP client cannot be created.
    pub fn new(configs: ProviderConfigs) -> Result<Self, SourceError> {
        let files = FileProvider::new(configs.file);
        Ok(Self {
            env: EnvFileProvider::new(files.clone()),
            files,
            http: HttpProvider::new(configs.http)?,
        })
    }

    /// Loads the text of a source specification.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] from the provider that handles `spec`.
    pub fn load_text(&self, spec: &SourceSpec) -> Result<String, SourceError> {
        match spec {
            SourceSpec::File {
                path,
            } => self.files.read_text(path),
            SourceSpec::Files {
                paths,
            } => self.files.read_concatenated(paths),
            SourceSpec::EnvValue {
                path,
                key,
            } => self.env.read_value(path, key),
            SourceSpec::Http {
                url,
                method,
                body,
                expect_status,
                secret,
            } => {
                let (resolved, redact_url) = match secret {
                    Some(secret) => {
                        let value = self.env.read_value(&secret.path, &secret.key)?;
                        (url.replace(SECRET_PLACEHOLDER, &value), true)
                    }
                    None => (url.clone(), false),
                };
                self.http.fetch(&HttpRequest {
                    url: &resolved,
                    method: *method,
                    body: body.as_ref(),
                    expect_status: *expect_status,
                    redact_url,
                })
            }
        }
    }
}

impl SourceLoader for SourceRegistry {
    fn load(&self, definition: &SourceDefinition) -> Result<SourceBlob, SourceUnavailable> {
        let location = definition.spec.location();
        match self.load_text(&definition.spec) {
            Ok(text) => Ok(SourceBlob::new(location, text)),
            Err(err) => Err(err.into_unavailable(definition.name.clone(), location)),
        }
    }
}
