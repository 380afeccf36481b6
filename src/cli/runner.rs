//! Scenario runner implementation
//!
//! ## ScenarioReporter Trait
//!
//! Progress output is routed through the `ScenarioReporter` trait so the run loop
//! stays free of console formatting. `ConsoleReporter` prints to stdout.
//!
//! ## Execution Model
//!
//! Scenarios run one at a time: the console is spawned, waited on, and only then
//! is the next scenario considered. There is no timeout, so a hung console blocks
//! the whole run. A console that exits non-zero is not a failure. A console that
//! cannot be started aborts the run.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use super::interfaces::{ConsoleLauncher, RunnerError};

/// Directory name prefix that marks a scenario
pub const SCENARIO_PREFIX: &str = "scenario";

/// Parameters file expected inside each scenario directory
pub const PARMS_FILE_NAME: &str = "parms.txt";

/// Console executable expected inside the console directory
pub const CONSOLE_EXECUTABLE: &str = "vdyp7console.exe";

// ============================================================================
// Scenario Reporter Trait
// ============================================================================

/// Trait for reporting scenario run progress.
pub trait ScenarioReporter {
    /// Called before the scenarios root is listed
    fn on_discovery_start(&mut self, _root: &Path) {}

    /// Called when a scenario has no parameters file
    fn on_scenario_skipped(&mut self, scenario: &Scenario);

    /// Called right before the console is launched for a scenario
    fn on_scenario_start(&mut self, scenario: &Scenario, executable: &Path);

    /// Called once the console has exited
    fn on_scenario_complete(&mut self, _scenario: &Scenario) {}

    /// Called when every scenario has been considered
    fn on_run_complete(&mut self, summary: &RunSummary);
}

/// Summary of a scenario run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub discovered: usize,
    pub invoked: usize,
    pub skipped: usize,
    pub duration: Duration,
}

/// Default console reporter
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ScenarioReporter for ConsoleReporter {
    fn on_scenario_skipped(&mut self, scenario: &Scenario) {
        println!("{}", skip_message(scenario));
    }

    fn on_scenario_start(&mut self, scenario: &Scenario, _executable: &Path) {
        println!("{}", start_message(scenario));
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        if let Some(line) = summary_message(summary) {
            println!("{line}");
        }
    }
}

/// Message printed when a scenario has no parameters file
pub fn skip_message(scenario: &Scenario) -> String {
    format!("Skipping {}: {} not found", scenario.name, PARMS_FILE_NAME)
}

/// Message printed before the console runs a scenario
pub fn start_message(scenario: &Scenario) -> String {
    format!("Running {}", scenario.name)
}

/// Closing summary line; `None` when nothing was discovered.
pub fn summary_message(summary: &RunSummary) -> Option<String> {
    if summary.discovered == 0 {
        return None;
    }
    Some(format!(
        "{} run, {} skipped in {:.2}s",
        summary.invoked,
        summary.skipped,
        summary.duration.as_secs_f64()
    ))
}

// ============================================================================
// Scenarios and configuration
// ============================================================================

/// A scenario directory directly under the scenarios root
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Scenario {
    /// Directory name, always starting with `scenario`
    pub name: String,
    /// `<scenarios root>/<name>`
    pub dir: PathBuf,
}

impl Scenario {
    pub fn new(root: &Path, name: impl Into<String>) -> Self {
        let name = name.into();
        let dir = root.join(&name);
        Self { name, dir }
    }

    /// Path of this scenario's `parms.txt`. It may not exist.
    pub fn parms_file(&self) -> PathBuf {
        self.dir.join(PARMS_FILE_NAME)
    }
}

/// Where the console lives and where the scenarios are
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub console_dir: PathBuf,
    pub scenarios_dir: PathBuf,
}

impl RunnerConfig {
    pub fn new(console_dir: impl Into<PathBuf>, scenarios_dir: impl Into<PathBuf>) -> Self {
        Self {
            console_dir: console_dir.into(),
            scenarios_dir: scenarios_dir.into(),
        }
    }

    /// `<console_dir>/vdyp7console.exe`. Existence is not checked.
    pub fn executable(&self) -> PathBuf {
        self.console_dir.join(CONSOLE_EXECUTABLE)
    }
}

/// Whether a directory name marks a scenario.
pub fn is_scenario_name(name: &str) -> bool {
    name.starts_with(SCENARIO_PREFIX)
}

// ============================================================================
// Discovery
// ============================================================================

/// List the scenario directories directly under `root`.
///
/// Files and directories not named `scenario*` are ignored. The result is sorted
/// by name so repeated runs over the same tree see the same order.
pub fn discover_scenarios(root: &Path) -> Result<Vec<Scenario>, RunnerError> {
    let list_error = |source| RunnerError::ListScenarios {
        path: root.to_path_buf(),
        source,
    };

    let mut scenarios = Vec::new();
    for entry in fs::read_dir(root).map_err(list_error)? {
        let entry = entry.map_err(list_error)?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        if !is_scenario_name(&name) {
            trace!(path = %path.display(), "ignoring entry without scenario prefix");
            continue;
        }
        if !path.is_dir() {
            trace!(path = %path.display(), "ignoring non-directory entry");
            continue;
        }

        scenarios.push(Scenario { name, dir: path });
    }

    scenarios.sort();
    Ok(scenarios)
}

// ============================================================================
// Run loop
// ============================================================================

/// Run the console over every scenario under `config.scenarios_dir`.
///
/// Scenarios without `parms.txt` are reported and skipped. The console's captured
/// output and exit status are dropped. Listing failures and launch failures abort
/// the run with no summary.
pub fn run_scenarios<L, R>(config: &RunnerConfig, launcher: &L, reporter: &mut R) -> Result<RunSummary, RunnerError>
where
    L: ConsoleLauncher + ?Sized,
    R: ScenarioReporter + ?Sized,
{
    let start_time = Instant::now();
    let executable = config.executable();

    reporter.on_discovery_start(&config.scenarios_dir);
    let scenarios = discover_scenarios(&config.scenarios_dir)?;
    debug!(
        root = %config.scenarios_dir.display(),
        count = scenarios.len(),
        "discovered scenarios"
    );

    let mut summary = RunSummary {
        discovered: scenarios.len(),
        ..RunSummary::default()
    };

    for scenario in &scenarios {
        let parms_file = scenario.parms_file();

        if !parms_file.exists() {
            reporter.on_scenario_skipped(scenario);
            summary.skipped += 1;
            continue;
        }

        reporter.on_scenario_start(scenario, &executable);
        debug!(
            scenario = %scenario.name,
            command = %format!("{} -p {}", executable.display(), parms_file.display()),
            "launching console"
        );

        let output = launcher.launch(&executable, &parms_file)?;
        debug!(
            scenario = %scenario.name,
            exit_code = ?output.exit_code,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "console exited"
        );

        reporter.on_scenario_complete(scenario);
        summary.invoked += 1;
    }

    summary.duration = start_time.elapsed();
    reporter.on_run_complete(&summary);
    Ok(summary)
}
