//! Scenario runner I/O boundary interfaces
//!
//! Spawning the console executable sits behind the `ConsoleLauncher` trait so the
//! run loop can be driven by a recording double in tests. `ProcessLauncher` is the
//! real implementation.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Errors that abort a scenario run
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to list scenarios in {}: {source}", .path.display())]
    ListScenarios {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to launch {}: {source}", .executable.display())]
    Launch {
        executable: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Output captured from one console invocation.
///
/// The runner never inspects this beyond debug logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    /// `None` when the child was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

// ============================================================================
// Console Launcher Interface
// ============================================================================

/// Launch the console executable for a single parameters file.
pub trait ConsoleLauncher {
    /// Run `executable -p <parms_file>` to completion and capture its output.
    ///
    /// Only a failure to start the process is an error. A child that exits
    /// non-zero still yields `Ok`.
    fn launch(&self, executable: &Path, parms_file: &Path) -> Result<CapturedOutput, RunnerError>;
}

/// Spawns the console as a child process and blocks until it exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl ConsoleLauncher for ProcessLauncher {
    fn launch(&self, executable: &Path, parms_file: &Path) -> Result<CapturedOutput, RunnerError> {
        let output = Command::new(executable)
            .arg("-p")
            .arg(parms_file)
            .output()
            .map_err(|source| RunnerError::Launch {
                executable: executable.to_path_buf(),
                source,
            })?;

        Ok(CapturedOutput {
            exit_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_executable_is_launch_error() {
        let exe = std::env::temp_dir().join("vdyp_runner_no_such_dir").join("vdyp7console.exe");
        let err = ProcessLauncher.launch(&exe, Path::new("parms.txt")).unwrap_err();

        match &err {
            RunnerError::Launch { executable, source } => {
                assert_eq!(executable, &exe);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("Expected Launch error, got {other:?}"),
        }
        assert!(err.to_string().starts_with("failed to launch "));
    }

    #[test]
    fn test_list_error_message_names_path() {
        let err = RunnerError::ListScenarios {
            path: PathBuf::from("runs"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to list scenarios in runs: denied");
    }
}
