// crates/check-gate-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example suite configuration.
// Purpose: Deterministic starting point for new suites.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The example covers every source kind, each verdict policy mode and the
//! missing-source policy, and always passes validation.

/// Returns a canonical example `check-gate.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[suite]
name = "Airdrop Fix Verification"
root = "/app"
report_path = "test-results/airdrop-fix-results.json"

[suite.policy]
degraded_min_success_rate = 80
warn_accounting = "counts_as_pass"

[suite.policy.success]
mode = "no_failures"

[logging]
audit = "stderr"

[providers.file]
max_bytes = 4194304

[providers.http]
timeout_ms = 10000
allow_http = false
max_response_bytes = 1048576
user_agent = "check-gate/0.1"

[[sources]]
name = "bot"
kind = "file"
path = "telegram-bot/bot.js"

[[sources]]
name = "wallet_manager"
kind = "file"
path = "telegram-bot/wallet-manager.js"

[[sources]]
name = "logs"
kind = "files"
paths = ["telegram-bot/bot.log", "telegram-bot/startup.log"]

[[sources]]
name = "package"
kind = "file"
path = "telegram-bot/package.json"

[[sources]]
name = "telegram"
kind = "http"
url = "https://api.telegram.org/bot{secret}/getMe"
expect_status = 200
secret = { path = "telegram-bot/.env", key = "TELEGRAM_BOT_TOKEN" }

[[tests]]
name = "Airdrop Command Implementation"
description = "The /airdrop command and its menu are wired up."

[tests.policy]
mode = "tolerance"
pass_max_failures = 0
warn_max_failures = 2

[[tests.checks]]
name = "airdrop command"
kind = "contains"
source = "bot"
needle = "bot.command('airdrop'"

[[tests.checks]]
name = "airdrop menu"
kind = "regex"
source = "bot"
pattern = "showAirdropMenu\\s*\\("

[[tests.checks]]
name = "no hardcoded wallet"
kind = "not"
predicate = { kind = "contains", source = "wallet_manager", needle = "PRIVATE_KEY = '" }

[[tests]]
name = "Dependencies"

[tests.policy]
mode = "strict"

[[tests.checks]]
name = "solana web3 declared"
kind = "json_path"
source = "package"
path = "$.dependencies['@solana/web3.js']"

[[tests.checks]]
name = "no dall-e references"
kind = "count"
source = "bot"
needle = "dall-e"
case_insensitive = true
comparator = "eq"
threshold = 0

[[tests]]
name = "Startup Logs"
on_missing_source = "warn"

[tests.policy]
mode = "score"
pass_min_score = 3
warn_min_score = 2

[tests.messages]
warn = "bot started with warnings ({failed} of {total} checks failed)"

[[tests.checks]]
name = "bot launched"
kind = "contains"
source = "logs"
needle = "Bot started"
weight = 2

[[tests.checks]]
name = "no errors"
kind = "count"
source = "logs"
needle = "error"
case_insensitive = true
comparator = "lte"
threshold = 2

[[tests]]
name = "Telegram API"
on_missing_source = "warn"

[tests.policy]
mode = "ratio"
pass_min_percent = 100
warn_min_percent = 50

[[tests.checks]]
name = "token accepted"
kind = "contains"
source = "telegram"
needle = "\"ok\":true"
"#,
    )
}
