#![forbid(unsafe_code)]
//! VDYP7 Scenario Runner
//!
//! Walks a directory of test scenarios and feeds each scenario's `parms.txt` to the
//! external `vdyp7console.exe`. Scenarios without a parameters file are reported and
//! skipped. The console's output and exit status are captured and dropped.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` with `?` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod version;

pub use cli::interfaces::{CapturedOutput, ConsoleLauncher, ProcessLauncher, RunnerError};
pub use cli::runner::{
    ConsoleReporter, RunSummary, RunnerConfig, Scenario, ScenarioReporter, discover_scenarios, run_scenarios,
};
