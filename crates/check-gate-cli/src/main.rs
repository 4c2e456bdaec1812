// crates/check-gate-cli/src/main.rs
// ============================================================================
// Module: Check Gate CLI Entry Point
// Description: Command dispatcher for suite runs and config utilities.
// Purpose: Run a configured check suite and persist its report.
// Dependencies: clap, check-gate-config, check-gate-core, check-gate-providers
// ============================================================================

//! ## Overview
//! `check-gate run` loads a suite config, runs every test sequentially with
//! the built-in source providers, streams the transcript to stdout, writes the
//! JSON report and exits with the suite's exit code. A run that cannot start
//! or cannot persist its report exits with the run-error code.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use check_gate_cli::clock::SystemClock;
use check_gate_cli::console::ConsoleObserver;
use check_gate_cli::report::write_report;
use check_gate_cli::t;
use check_gate_config::AuditSinkKind;
use check_gate_config::CheckGateConfig;
use check_gate_config::config_toml_example;
use check_gate_core::AuditObserver;
use check_gate_core::FileAuditSink;
use check_gate_core::RUN_ERROR_EXIT_CODE;
use check_gate_core::RunObserver;
use check_gate_core::StderrAuditSink;
use check_gate_core::SuiteRunner;
use check_gate_providers::SourceRegistry;
use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "check-gate", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a check suite.
    Run(RunCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for `run`.
#[derive(Args, Debug)]
struct RunCommand {
    /// Suite config path (defaults to `CHECK_GATE_CONFIG`, then `./check-gate.toml`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Report destination overriding `suite.report_path`.
    #[arg(long, value_name = "PATH", conflicts_with = "no_report")]
    report: Option<PathBuf>,
    /// Skip writing the JSON report.
    #[arg(long, action = ArgAction::SetTrue)]
    no_report: bool,
    /// Print only the banner and the summary block.
    #[arg(long, action = ArgAction::SetTrue)]
    quiet: bool,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a suite config.
    Validate(ConfigValidateCommand),
    /// Print an example suite config.
    Example,
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Suite config path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for catalog messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a catalog message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))?;
        return Ok(ExitCode::SUCCESS);
    }
    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };
    match command {
        Commands::Run(command) => command_run(&command),
        Commands::Config {
            command,
        } => match command {
            ConfigCommand::Validate(command) => command_config_validate(&command),
            ConfigCommand::Example => command_config_example(),
        },
    }
}

/// Prints the top-level help text.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| stdout_error(&err))?;
    write_stdout_line("")
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Executes `run`.
fn command_run(command: &RunCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let registry = SourceRegistry::new(config.provider_configs())
        .map_err(|err| CliError::new(t!("run.providers_failed", error = err)))?;

    let mut runner = SuiteRunner::new(registry, SystemClock)
        .with_observer(Box::new(ConsoleObserver::new(std::io::stdout(), command.quiet)));
    if let Some(observer) = audit_observer(&config)? {
        runner = runner.with_observer(observer);
    }

    let record = runner.run(&config.to_suite_spec());

    if !command.no_report {
        let path = command.report.clone().unwrap_or_else(|| config.report_path());
        write_report(&path, &record).map_err(CliError::new)?;
        write_stdout_line(&t!("report.saved", path = path.display()))?;
    }
    Ok(ExitCode::from(record.exit_code))
}

/// Builds the configured audit observer, if any.
fn audit_observer(config: &CheckGateConfig) -> CliResult<Option<Box<dyn RunObserver>>> {
    match config.logging.audit {
        AuditSinkKind::None => Ok(None),
        AuditSinkKind::Stderr => Ok(Some(Box::new(AuditObserver::new(StderrAuditSink)))),
        AuditSinkKind::File => {
            let Some(path) = config.audit_path() else {
                return Ok(None);
            };
            let sink = open_audit_file(&path).map_err(|err| {
                CliError::new(t!("run.audit_failed", path = path.display(), error = err))
            })?;
            Ok(Some(Box::new(AuditObserver::new(sink))))
        }
    }
}

/// Opens the audit log, creating its parent directory.
fn open_audit_file(path: &Path) -> std::io::Result<FileAuditSink> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    FileAuditSink::new(path)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Executes `config validate`.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    write_stdout_line(&t!(
        "config.validate.ok",
        tests = config.tests.len(),
        sources = config.sources.len()
    ))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `config example`.
fn command_config_example() -> CliResult<ExitCode> {
    let example = config_toml_example();
    write_stdout_line(example.trim_end())?;
    Ok(ExitCode::SUCCESS)
}

/// Loads and validates the suite config.
fn load_config(path: Option<&Path>) -> CliResult<CheckGateConfig> {
    CheckGateConfig::load(path).map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}").map_err(|err| stdout_error(&err))
}

/// Formats a stdout write failure.
fn stdout_error(error: &std::io::Error) -> CliError {
    CliError::new(t!("output.write_failed", stream = t!("output.stream.stdout"), error = error))
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns the run-error exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::from(RUN_ERROR_EXIT_CODE)
}
