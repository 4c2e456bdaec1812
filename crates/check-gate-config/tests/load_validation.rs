//! Config load validation tests for check-gate-config.
// crates/check-gate-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding).
// Purpose: Ensure config input handling is strict and fail-closed.
// =============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;

use check_gate_config::CheckGateConfig;
use check_gate_config::ConfigError;
use check_gate_config::config_toml_example;
use tempfile::NamedTempFile;
use tempfile::TempDir;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<CheckGateConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config load".to_string()),
    }
}

const MINIMAL: &str = r#"
[suite]
name = "minimal"

[[sources]]
name = "bot"
kind = "file"
path = "bot.js"

[[tests]]
name = "Bot"
policy = { mode = "strict" }

[[tests.checks]]
name = "command"
kind = "contains"
source = "bot"
needle = "bot.command"
"#;

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    assert_invalid(
        CheckGateConfig::load(Some(Path::new(&long_path))),
        "config path exceeds max length",
    )
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    assert_invalid(
        CheckGateConfig::load(Some(Path::new(&long_component))),
        "config path component too long",
    )
}

#[test]
fn load_rejects_missing_file() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    assert_invalid(CheckGateConfig::load(Some(&path)), "config io error")
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    let payload = vec![b'#'; 1_048_577];
    file.write_all(&payload).map_err(|err| err.to_string())?;
    assert_invalid(CheckGateConfig::load(Some(file.path())), "config file exceeds size limit")
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&[0xFF, 0xFE, 0xFF]).map_err(|err| err.to_string())?;
    assert_invalid(CheckGateConfig::load(Some(file.path())), "config file must be utf-8")
}

#[test]
fn load_rejects_malformed_toml() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(b"[suite\nname = ").map_err(|err| err.to_string())?;
    assert_invalid(CheckGateConfig::load(Some(file.path())), "config parse error")
}

#[test]
fn load_rejects_unknown_top_level_section() -> TestResult {
    let content = format!("{MINIMAL}\n[server]\nport = 1\n");
    assert_invalid(CheckGateConfig::from_toml_str(&content, Path::new(".")), "config parse error")
}

#[test]
fn root_defaults_to_config_directory() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("check-gate.toml");
    fs::write(&path, MINIMAL).map_err(|err| err.to_string())?;
    let config = CheckGateConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    if config.root() != dir.path() {
        return Err(format!("unexpected root {}", config.root().display()));
    }
    if config.report_path() != dir.path().join("check-gate-report.json") {
        return Err(format!("unexpected report path {}", config.report_path().display()));
    }
    Ok(())
}

#[test]
fn relative_root_joins_config_directory() -> TestResult {
    let content = MINIMAL.replace(
        "name = \"minimal\"",
        "name = \"minimal\"\nroot = \"app\"\nreport_path = \"out/report.json\"",
    );
    let config = CheckGateConfig::from_toml_str(&content, Path::new("/etc/suites"))
        .map_err(|err| err.to_string())?;
    if config.root() != Path::new("/etc/suites/app") {
        return Err(format!("unexpected root {}", config.root().display()));
    }
    if config.report_path() != Path::new("/etc/suites/app/out/report.json") {
        return Err(format!("unexpected report path {}", config.report_path().display()));
    }
    let providers = config.provider_configs();
    if providers.file.root.as_deref() != Some(Path::new("/etc/suites/app")) {
        return Err("provider root does not follow suite root".to_string());
    }
    Ok(())
}

#[test]
fn absolute_root_is_kept() -> TestResult {
    let content = MINIMAL.replace("name = \"minimal\"", "name = \"minimal\"\nroot = \"/app\"");
    let config = CheckGateConfig::from_toml_str(&content, Path::new("/etc/suites"))
        .map_err(|err| err.to_string())?;
    if config.root() != Path::new("/app") {
        return Err(format!("unexpected root {}", config.root().display()));
    }
    Ok(())
}

#[test]
fn example_config_is_valid() -> TestResult {
    let config = CheckGateConfig::from_toml_str(&config_toml_example(), Path::new("."))
        .map_err(|err| err.to_string())?;
    let spec = config.to_suite_spec();
    if spec.tests.len() != 4 || spec.sources.len() != 5 {
        return Err(format!(
            "unexpected example shape: {} tests, {} sources",
            spec.tests.len(),
            spec.sources.len()
        ));
    }
    if config.audit_path().is_some() {
        return Err("stderr sink must not have a path".to_string());
    }
    Ok(())
}
