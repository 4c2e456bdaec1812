// crates/check-gate-providers/tests/common/mod.rs
// ============================================================================
// Module: Provider Test Fixtures
// Description: Temporary files, local providers and a fixed clock.
// ============================================================================

//! Shared fixtures for provider integration tests.

#![allow(dead_code, reason = "Each test binary uses a different subset of fixtures.")]

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use check_gate_core::Clock;
use check_gate_core::Timestamp;
use check_gate_providers::FileProviderConfig;
use check_gate_providers::HttpProvider;
use check_gate_providers::HttpProviderConfig;
use check_gate_providers::ProviderConfigs;
use check_gate_providers::SourceRegistry;

/// Clock pinned to a single instant.
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_unix_millis(self.0)
    }
}

/// Writes `contents` to `dir/name` and returns the full path.
pub fn write_file(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

/// HTTP configuration allowing cleartext requests to local test servers.
pub fn local_http_config(timeout_ms: u64) -> HttpProviderConfig {
    HttpProviderConfig {
        allow_http: true,
        timeout_ms,
        ..HttpProviderConfig::default()
    }
}

/// HTTP provider for local test servers.
pub fn local_http_provider() -> HttpProvider {
    HttpProvider::new(local_http_config(5000)).unwrap()
}

/// Registry rooted at `root` that may reach local test servers.
pub fn local_registry(root: &Path, timeout_ms: u64) -> SourceRegistry {
    SourceRegistry::new(ProviderConfigs {
        file: FileProviderConfig {
            root: Some(root.to_path_buf()),
            ..FileProviderConfig::default()
        },
        http: local_http_config(timeout_ms),
    })
    .unwrap()
}
