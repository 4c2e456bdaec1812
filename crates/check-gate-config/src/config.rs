// crates/check-gate-config/src/config.rs
// ============================================================================
// Module: Check Gate Configuration
// Description: Suite configuration loading and validation.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: check-gate-core, check-gate-providers, serde, toml
// ============================================================================

//! ## Overview
//! A suite is described by one TOML file: suite metadata and policy, audit
//! logging, provider limits, declared sources and the ordered tests with their
//! check tables. Loading enforces size, encoding and path limits before
//! parsing, then validates the whole suite so that a run never starts on a
//! malformed check table.
//!
//! Relative source paths resolve against the suite root. The root defaults to
//! the directory holding the config file; a relative `suite.root` is joined
//! onto that directory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use check_gate_core::HttpMethod;
use check_gate_core::SourceDefinition;
use check_gate_core::SourceSpec;
use check_gate_core::SuiteName;
use check_gate_core::SuitePolicy;
use check_gate_core::SuiteSpec;
use check_gate_core::TestDefinition;
use check_gate_providers::FileProviderConfig;
use check_gate_providers::HttpProviderConfig;
use check_gate_providers::ProviderConfigs;
use check_gate_providers::SECRET_PLACEHOLDER;
use check_gate_providers::file::DEFAULT_MAX_FILE_BYTES;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "check-gate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "CHECK_GATE_CONFIG";
/// Default report filename, relative to the suite root.
pub const DEFAULT_REPORT_FILE: &str = "check-gate-report.json";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Minimum HTTP source timeout in milliseconds.
pub(crate) const MIN_HTTP_TIMEOUT_MS: u64 = 100;
/// Maximum HTTP source timeout in milliseconds.
pub(crate) const MAX_HTTP_TIMEOUT_MS: u64 = 60_000;
/// Maximum allowed per-file read limit in bytes.
pub(crate) const MAX_FILE_MAX_BYTES: usize = 64 * 1024 * 1024;
/// Maximum allowed HTTP response limit in bytes.
pub(crate) const MAX_HTTP_RESPONSE_BYTES: usize = 16 * 1024 * 1024;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Check Gate suite configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckGateConfig {
    /// Suite metadata and outcome policy.
    pub suite: SuiteConfig,
    /// Audit logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Provider limits.
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Declared sources.
    #[serde(default)]
    pub sources: Vec<SourceDefinition>,
    /// Ordered tests.
    #[serde(default)]
    pub tests: Vec<TestDefinition>,
    /// Directory relative paths resolve against (not serialized).
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl CheckGateConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", resolved.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let base_dir = match resolved.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::from_toml_str(content, &base_dir)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.base_dir = base_dir.to_path_buf();
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.suite.validate()?;
        self.logging.validate()?;
        self.providers.validate()?;
        for source in &self.sources {
            validate_source(source)?;
        }
        self.to_suite_spec().validate().map_err(|err| ConfigError::Invalid(err.to_string()))
    }

    /// Returns the suite root used to resolve relative source paths.
    #[must_use]
    pub fn root(&self) -> PathBuf {
        self.suite
            .root
            .as_ref()
            .map_or_else(|| self.base_dir.clone(), |root| self.base_dir.join(root))
    }

    /// Returns the resolved report path.
    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        let relative =
            self.suite.report_path.as_deref().unwrap_or_else(|| Path::new(DEFAULT_REPORT_FILE));
        self.root().join(relative)
    }

    /// Returns the resolved audit log path, when a file sink is configured.
    #[must_use]
    pub fn audit_path(&self) -> Option<PathBuf> {
        match self.logging.audit {
            AuditSinkKind::File => self.logging.path.as_ref().map(|path| self.base_dir.join(path)),
            AuditSinkKind::None | AuditSinkKind::Stderr => None,
        }
    }

    /// Builds the core suite specification.
    #[must_use]
    pub fn to_suite_spec(&self) -> SuiteSpec {
        SuiteSpec {
            name: self.suite.name.clone(),
            policy: self.suite.policy,
            sources: self.sources.clone(),
            tests: self.tests.clone(),
        }
    }

    /// Builds provider configurations rooted at the suite root.
    #[must_use]
    pub fn provider_configs(&self) -> ProviderConfigs {
        ProviderConfigs {
            file: FileProviderConfig {
                root: Some(self.root()),
                max_bytes: self.providers.file.max_bytes,
            },
            http: self.providers.http.clone(),
        }
    }
}

/// Suite metadata and outcome policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    /// Suite name shown in the banner and report.
    pub name: SuiteName,
    /// Root for relative source paths (relative to the config directory).
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Report destination (relative to the suite root).
    #[serde(default)]
    pub report_path: Option<PathBuf>,
    /// Suite outcome policy.
    #[serde(default)]
    pub policy: SuitePolicy,
}

impl SuiteConfig {
    /// Validates suite-level paths.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(root) = &self.root {
            validate_path_string("suite.root", &root.to_string_lossy())?;
        }
        if let Some(report_path) = &self.report_path {
            validate_path_string("suite.report_path", &report_path.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// No audit events.
    #[default]
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to a file.
    File,
}

/// Audit logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Audit sink.
    #[serde(default)]
    pub audit: AuditSinkKind,
    /// Audit log path for the file sink (relative to the config directory).
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl LoggingConfig {
    /// Validates sink and path consistency.
    fn validate(&self) -> Result<(), ConfigError> {
        match (&self.audit, &self.path) {
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("logging.path is required for the file sink".to_string()))
            }
            (AuditSinkKind::File, Some(path)) => {
                validate_path_string("logging.path", &path.to_string_lossy())
            }
            (AuditSinkKind::None | AuditSinkKind::Stderr, Some(_)) => Err(ConfigError::Invalid(
                "logging.path is only valid for the file sink".to_string(),
            )),
            (AuditSinkKind::None | AuditSinkKind::Stderr, None) => Ok(()),
        }
    }
}

/// Provider limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    /// File read limits.
    #[serde(default)]
    pub file: FileLimitsConfig,
    /// HTTP request settings.
    #[serde(default)]
    pub http: HttpProviderConfig,
}

impl ProvidersConfig {
    /// Validates provider limits.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.file.max_bytes == 0 || self.file.max_bytes > MAX_FILE_MAX_BYTES {
            return Err(ConfigError::Invalid(format!(
                "providers.file.max_bytes must be between 1 and {MAX_FILE_MAX_BYTES}"
            )));
        }
        let http = &self.http;
        if !(MIN_HTTP_TIMEOUT_MS ..= MAX_HTTP_TIMEOUT_MS).contains(&http.timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "providers.http.timeout_ms must be between {MIN_HTTP_TIMEOUT_MS} and \
                 {MAX_HTTP_TIMEOUT_MS}"
            )));
        }
        if http.max_response_bytes == 0 || http.max_response_bytes > MAX_HTTP_RESPONSE_BYTES {
            return Err(ConfigError::Invalid(format!(
                "providers.http.max_response_bytes must be between 1 and \
                 {MAX_HTTP_RESPONSE_BYTES}"
            )));
        }
        if http.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "providers.http.user_agent must be non-empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// File read limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileLimitsConfig {
    /// Maximum bytes read per file.
    pub max_bytes: usize,
}

impl Default for FileLimitsConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the argument, environment, or default.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Enforces path length limits on the config path.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Enforces non-empty and length limits on a configured path.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates paths and URL templates of one source declaration.
fn validate_source(source: &SourceDefinition) -> Result<(), ConfigError> {
    let field = format!("sources.{}", source.name);
    match &source.spec {
        SourceSpec::File {
            path,
        } => validate_path_string(&format!("{field}.path"), &path.to_string_lossy()),
        SourceSpec::Files {
            paths,
        } => {
            if paths.is_empty() {
                return Err(ConfigError::Invalid(format!("{field}.paths must be non-empty")));
            }
            for path in paths {
                validate_path_string(&format!("{field}.paths"), &path.to_string_lossy())?;
            }
            Ok(())
        }
        SourceSpec::EnvValue {
            path,
            key,
        } => {
            validate_path_string(&format!("{field}.path"), &path.to_string_lossy())?;
            if key.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{field}.key must be non-empty")));
            }
            Ok(())
        }
        SourceSpec::Http {
            url,
            method,
            body,
            secret,
            ..
        } => {
            if url.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{field}.url must be non-empty")));
            }
            if *method == HttpMethod::Get && body.is_some() {
                return Err(ConfigError::Invalid(format!(
                    "{field}.body is only allowed with method = \"post\""
                )));
            }
            let templated = url.contains(SECRET_PLACEHOLDER);
            match secret {
                Some(secret) => {
                    if !templated {
                        return Err(ConfigError::Invalid(format!(
                            "{field}.url must contain {SECRET_PLACEHOLDER} when a secret is set"
                        )));
                    }
                    validate_path_string(
                        &format!("{field}.secret.path"),
                        &secret.path.to_string_lossy(),
                    )?;
                    if secret.key.trim().is_empty() {
                        return Err(ConfigError::Invalid(format!(
                            "{field}.secret.key must be non-empty"
                        )));
                    }
                    Ok(())
                }
                None if templated => Err(ConfigError::Invalid(format!(
                    "{field}.url uses {SECRET_PLACEHOLDER} but no secret is set"
                ))),
                None => Ok(()),
            }
        }
    }
}
