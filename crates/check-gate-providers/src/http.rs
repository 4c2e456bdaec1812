// crates/check-gate-providers/src/http.rs
// ============================================================================
// Module: HTTP Source Provider
// Description: Single bounded HTTP request whose body becomes source text.
// Purpose: Support endpoint health checks with strict limits and no retries.
// Dependencies: crate::error, check-gate-core, reqwest, serde_json
// ============================================================================

//! ## Overview
//! The HTTP provider issues exactly one GET or POST per load, with a total
//! request timeout, redirects disabled and a hard response-size limit. A
//! response whose status differs from the expected status is unavailable.
//! When the URL carries a secret, error messages are stripped of the URL so
//! tokens never reach reports or logs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::error::Error as StdError;
use std::io::Read;
use std::time::Duration;

use check_gate_core::HttpMethod;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use serde::Deserialize;
use serde_json::Value;

use crate::error::SourceError;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default request timeout, in milliseconds.
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;

/// Configuration for the HTTP provider.
///
/// # Invariants
/// - `allow_http = false` blocks cleartext `http://` URLs.
/// - `max_response_bytes` is enforced as a hard upper bound on response bodies.
/// - `timeout_ms` applies to the full request lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpProviderConfig {
    /// Allow cleartext HTTP (disabled by default).
    pub allow_http: bool,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl Default for HttpProviderConfig {
    fn default() -> Self {
        Self {
            allow_http: false,
            timeout_ms: DEFAULT_HTTP_TIMEOUT_MS,
            max_response_bytes: 1024 * 1024,
            user_agent: "check-gate/0.1".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Requests
// ============================================================================

/// One outbound request.
#[derive(Debug, Clone, Copy)]
pub struct HttpRequest<'a> {
    /// Fully substituted URL.
    pub url: &'a str,
    /// Request method.
    pub method: HttpMethod,
    /// Optional JSON body, sent only with POST.
    pub body: Option<&'a Value>,
    /// Expected response status.
    pub expect_status: u16,
    /// Strip the URL from error messages.
    pub redact_url: bool,
}

// ============================================================================
// SECTION: Provider Implementation
// ============================================================================

/// Fetches HTTP response bodies as source text.
///
/// # Invariants
/// - Redirects are not followed.
/// - Requests are attempted exactly once.
pub struct HttpProvider {
    /// Provider configuration, including limits and policy.
    config: HttpProviderConfig,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl HttpProvider {
    /// Creates a new HTTP provider with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the HTTP client cannot be created.
    pub fn new(config: HttpProviderConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|err| SourceError::RequestFailed(format!("client build failed: {err}")))?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Sends the request and returns the response body as text.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the URL is rejected, the request fails or
    /// times out, the status is unexpected, or the body is too large or not UTF-8.
    pub fn fetch(&self, request: &HttpRequest<'_>) -> Result<String, SourceError> {
        let url = Url::parse(request.url)
            .map_err(|_| SourceError::RequestFailed("invalid url".to_string()))?;
        match url.scheme() {
            "https" => {}
            "http" if self.config.allow_http => {}
            _ => return Err(SourceError::RequestFailed("unsupported url scheme".to_string())),
        }

        let builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => {
                let builder = self.client.post(url);
                match request.body {
                    Some(body) => builder.json(body),
                    None => builder,
                }
            }
        };
        let mut response = builder.send().map_err(|err| {
            let err = if request.redact_url { err.without_url() } else { err };
            SourceError::RequestFailed(error_chain(&err))
        })?;

        let status = response.status().as_u16();
        if status != request.expect_status {
            return Err(SourceError::UnexpectedStatus {
                actual: status,
                expected: request.expect_status,
            });
        }
        let body = read_response_limited(&mut response, self.config.max_response_bytes)?;
        String::from_utf8(body).map_err(|_| SourceError::NotUtf8)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a response body while enforcing a maximum byte limit.
fn read_response_limited(
    response: &mut impl Read,
    max_bytes: usize,
) -> Result<Vec<u8>, SourceError> {
    let limit = u64::try_from(max_bytes.saturating_add(1)).map_err(|_| SourceError::TooLarge {
        limit: max_bytes,
    })?;
    let mut buf = Vec::new();
    response
        .take(limit)
        .read_to_end(&mut buf)
        .map_err(|err| SourceError::RequestFailed(format!("body read failed: {err}")))?;
    if buf.len() > max_bytes {
        return Err(SourceError::TooLarge {
            limit: max_bytes,
        });
    }
    Ok(buf)
}

/// Renders an error and its sources as one line.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
