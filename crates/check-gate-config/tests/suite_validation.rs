//! Suite validation tests for check-gate-config.
// crates/check-gate-config/tests/suite_validation.rs
// =============================================================================
// Module: Suite Validation Tests
// Description: Reject malformed check tables, policies and provider limits.
// Purpose: Ensure a run never starts on an invalid suite.
// =============================================================================

use std::path::Path;

use check_gate_config::AuditSinkKind;
use check_gate_config::CheckGateConfig;
use check_gate_config::ConfigError;

type TestResult = Result<(), String>;

fn parse(content: &str) -> Result<CheckGateConfig, ConfigError> {
    CheckGateConfig::from_toml_str(content, Path::new("/suites"))
}

fn assert_invalid(content: &str, needle: &str) -> TestResult {
    match parse(content) {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}

fn suite_with(extra: &str) -> String {
    format!(
        r#"
[suite]
name = "validation"

[[sources]]
name = "bot"
kind = "file"
path = "bot.js"
{extra}
"#
    )
}

#[test]
fn rejects_undeclared_source() -> TestResult {
    let content = suite_with(
        r#"
[[tests]]
name = "Bot"
policy = { mode = "strict" }
checks = [{ name = "c", kind = "contains", source = "wallet", needle = "x" }]
"#,
    );
    assert_invalid(&content, "wallet")
}

#[test]
fn rejects_invalid_regex() -> TestResult {
    let content = suite_with(
        r#"
[[tests]]
name = "Bot"
policy = { mode = "strict" }
checks = [{ name = "c", kind = "regex", source = "bot", pattern = "(unclosed" }]
"#,
    );
    assert_invalid(&content, "invalid config")
}

#[test]
fn rejects_duplicate_test_names() -> TestResult {
    let content = suite_with(
        r#"
[[tests]]
name = "Bot"
policy = { mode = "strict" }

[[tests]]
name = "Bot"
policy = { mode = "strict" }
"#,
    );
    assert_invalid(&content, "Bot")
}

#[test]
fn rejects_missing_test_policy() -> TestResult {
    let content = suite_with(
        r#"
[[tests]]
name = "Bot"
"#,
    );
    assert_invalid(&content, "config parse error")
}

#[test]
fn rejects_inverted_tolerance_band() -> TestResult {
    let content = suite_with(
        r#"
[[tests]]
name = "Bot"
policy = { mode = "tolerance", pass_max_failures = 3, warn_max_failures = 1 }
"#,
    );
    assert_invalid(&content, "invalid config")
}

#[test]
fn rejects_ratio_above_hundred() -> TestResult {
    let content = suite_with(
        r#"
[[tests]]
name = "Bot"
policy = { mode = "ratio", pass_min_percent = 120, warn_min_percent = 50 }
"#,
    );
    assert_invalid(&content, "invalid config")
}

#[test]
fn rejects_http_timeout_out_of_range() -> TestResult {
    assert_invalid(&suite_with("[providers.http]\ntimeout_ms = 50\n"), "timeout_ms")?;
    assert_invalid(&suite_with("[providers.http]\ntimeout_ms = 60001\n"), "timeout_ms")
}

#[test]
fn rejects_zero_file_limit() -> TestResult {
    assert_invalid(&suite_with("[providers.file]\nmax_bytes = 0\n"), "max_bytes")
}

#[test]
fn rejects_file_sink_without_path() -> TestResult {
    assert_invalid(&suite_with("[logging]\naudit = \"file\"\n"), "logging.path")
}

#[test]
fn rejects_path_for_stderr_sink() -> TestResult {
    let content = suite_with("[logging]\naudit = \"stderr\"\npath = \"audit.jsonl\"\n");
    assert_invalid(&content, "logging.path")
}

#[test]
fn file_sink_path_resolves_against_config_directory() -> TestResult {
    let config = parse(&suite_with("[logging]\naudit = \"file\"\npath = \"logs/audit.jsonl\"\n"))
        .map_err(|err| err.to_string())?;
    if config.logging.audit != AuditSinkKind::File {
        return Err("expected file sink".to_string());
    }
    if config.audit_path().as_deref() != Some(Path::new("/suites/logs/audit.jsonl")) {
        return Err("unexpected audit path".to_string());
    }
    Ok(())
}

#[test]
fn rejects_secret_placeholder_without_secret() -> TestResult {
    let content = suite_with(
        r#"
[[sources]]
name = "api"
kind = "http"
url = "https://api.example.test/bot{secret}/getMe"
"#,
    );
    assert_invalid(&content, "no secret is set")
}

#[test]
fn rejects_secret_without_placeholder() -> TestResult {
    let content = suite_with(
        r#"
[[sources]]
name = "api"
kind = "http"
url = "https://api.example.test/getMe"
secret = { path = ".env", key = "TELEGRAM_BOT_TOKEN" }
"#,
    );
    assert_invalid(&content, "must contain {secret}")
}

#[test]
fn rejects_empty_multi_file_source() -> TestResult {
    let content = suite_with(
        r#"
[[sources]]
name = "logs"
kind = "files"
paths = []
"#,
    );
    assert_invalid(&content, "paths must be non-empty")
}

#[test]
fn accepts_nested_combinators() -> TestResult {
    let content = suite_with(
        r#"
[[tests]]
name = "Bot"
policy = { mode = "strict" }

[[tests.checks]]
name = "either command"
kind = "any"
predicates = [
    { kind = "contains", source = "bot", needle = "bot.command('airdrop'" },
    { kind = "regex", source = "bot", pattern = "bot\\.hears\\(/airdrop/" },
]

[[tests.checks]]
name = "two of three"
kind = "at_least"
min = 2
predicates = [
    { kind = "contains", source = "bot", needle = "a" },
    { kind = "contains", source = "bot", needle = "b" },
    { kind = "not", predicate = { kind = "contains", source = "bot", needle = "c" } },
]
"#,
    );
    let config = parse(&content).map_err(|err| err.to_string())?;
    let spec = config.to_suite_spec();
    if spec.tests[0].checks.len() != 2 {
        return Err("expected two checks".to_string());
    }
    Ok(())
}

#[test]
fn rejects_unknown_http_provider_field() -> TestResult {
    assert_invalid(&suite_with("[providers.http]\ntimout_ms = 5000\n"), "timout_ms")
}

#[test]
fn rejects_body_on_get_source() -> TestResult {
    let content = suite_with(
        r#"
[[sources]]
name = "api"
kind = "http"
url = "https://api.example.test/health"
method = "get"
body = { prompt = "test" }
"#,
    );
    assert_invalid(&content, "sources.api.body is only allowed with method = \"post\"")
}

#[test]
fn accepts_body_on_post_source() -> TestResult {
    let content = suite_with(
        r#"
[[sources]]
name = "api"
kind = "http"
url = "https://api.example.test/generate"
method = "post"
body = { prompt = "test" }
"#,
    );
    parse(&content).map(|_| ()).map_err(|err| err.to_string())
}

#[test]
fn rejects_unreachable_pass_score() -> TestResult {
    let content = suite_with(
        r#"
[[tests]]
name = "Bot"
policy = { mode = "score", pass_min_score = 4, warn_min_score = 1 }
checks = [
    { name = "a", kind = "contains", source = "bot", needle = "a", weight = 2 },
    { name = "b", kind = "contains", source = "bot", needle = "b" },
]
"#,
    );
    assert_invalid(&content, "pass_min_score 4 exceeds total check weight 3")
}

#[test]
fn accepts_pass_score_equal_to_total_weight() -> TestResult {
    let content = suite_with(
        r#"
[[tests]]
name = "Bot"
policy = { mode = "score", pass_min_score = 3, warn_min_score = 1 }
checks = [
    { name = "a", kind = "contains", source = "bot", needle = "a", weight = 2 },
    { name = "b", kind = "contains", source = "bot", needle = "b" },
]
"#,
    );
    parse(&content).map(|_| ()).map_err(|err| err.to_string())
}
