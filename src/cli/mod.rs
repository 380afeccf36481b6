//! CLI module for the scenario runner
//!
//! ```text
//! vdyp-scenario-runner <CONSOLE_PATH> <SCENARIOS_PATH>
//! ```
//!
//! ## Modules
//!
//! - `runner` - Scenario discovery, the run loop, and reporting
//! - `interfaces` - Process launching boundary and runner errors
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod interfaces;
pub mod runner;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::version::RUNNER_VERSION;

use self::interfaces::{ProcessLauncher, RunnerError};
use self::runner::{ConsoleReporter, RunnerConfig, run_scenarios};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<RunnerError> for CliError {
    fn from(err: RunnerError) -> Self {
        CliError::failure(format!("Error: {err}"))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Run vdyp7console.exe over every scenario directory that has a parms.txt
#[derive(Parser, Debug)]
#[command(name = "vdyp-scenario-runner")]
#[command(version = RUNNER_VERSION)]
#[command(about = "Run vdyp7console.exe over a directory of test scenarios", long_about = None)]
pub struct Cli {
    /// Directory containing vdyp7console.exe
    #[arg(value_name = "CONSOLE_PATH")]
    pub console_path: PathBuf,

    /// Directory containing the scenario* subdirectories
    #[arg(value_name = "SCENARIOS_PATH")]
    pub scenarios_path: PathBuf,
}

impl From<Cli> for RunnerConfig {
    fn from(cli: Cli) -> Self {
        RunnerConfig::new(cli.console_path, cli.scenarios_path)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. Argument errors exit
/// through clap (code 2); runner errors are printed to stderr and exit with code 1.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the parsed command line and return the exit code.
///
/// Child process exit codes never influence the result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = RunnerConfig::from(cli);
    let mut reporter = ConsoleReporter::new();

    run_scenarios(&config, &ProcessLauncher, &mut reporter)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_cli_parse_positionals() {
        let cli = Cli::try_parse_from(["vdyp-scenario-runner", "C:/VDYP7", "scenarios"]).unwrap();
        assert_eq!(cli.console_path, PathBuf::from("C:/VDYP7"));
        assert_eq!(cli.scenarios_path, PathBuf::from("scenarios"));
    }

    #[test]
    fn test_cli_requires_both_paths() {
        let err = Cli::try_parse_from(["vdyp-scenario-runner", "console"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_cli_rejects_extra_arguments() {
        let err = Cli::try_parse_from(["vdyp-scenario-runner", "a", "b", "c"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_cli_into_config() {
        let cli = Cli::try_parse_from(["vdyp-scenario-runner", "bin", "data"]).unwrap();
        let config = RunnerConfig::from(cli);
        assert_eq!(config.executable(), Path::new("bin").join("vdyp7console.exe"));
        assert_eq!(config.scenarios_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_runner_error_maps_to_failure() {
        let err = RunnerError::ListScenarios {
            path: PathBuf::from("missing"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let cli_err = CliError::from(err);
        assert_eq!(cli_err.exit_code, ExitCode::FAILURE);
        assert!(cli_err.message.starts_with("Error: failed to list scenarios in missing"));
    }

    #[test]
    fn test_execute_missing_scenarios_dir_fails() {
        let cli = Cli::try_parse_from([
            "vdyp-scenario-runner",
            "console",
            "/definitely/not/a/scenarios/root",
        ])
        .unwrap();
        let err = execute(cli).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }
}
