//! External command execution.
//!
//! The collector never spawns processes directly; it goes through a
//! [`CommandRunner`] so that tests can substitute canned tool output.

use std::io::ErrorKind;
use std::process::Command;
use tracing::trace;

use crate::error::{DiskError, Result};

/// What a finished process left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn this output into a [`DiskError::ProcessFailure`] for `program`.
    pub fn into_failure(self, program: &str) -> DiskError {
        DiskError::ProcessFailure {
            program: program.to_string(),
            code: self.code,
            stderr: self.stderr.trim().to_string(),
        }
    }
}

/// Runs an external program to completion.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, blocking until it exits, and return its
    /// output whatever the exit status.
    ///
    /// A missing executable maps to [`DiskError::ExecutableMissing`], any
    /// other spawn failure to [`DiskError::ProcessFailure`].
    fn output(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;

    /// Like [`output`](Self::output), but a non-zero exit status is a
    /// [`DiskError::ProcessFailure`]. Returns stdout.
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let output = self.output(program, args)?;
        if !output.success() {
            return Err(output.into_failure(program));
        }
        Ok(output.stdout)
    }
}

/// [`CommandRunner`] backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn output(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        trace!(program = %program, args = ?args, "Running command");

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => DiskError::ExecutableMissing {
                    program: program.to_string(),
                },
                _ => DiskError::ProcessFailure {
                    program: program.to_string(),
                    code: None,
                    stderr: e.to_string(),
                },
            })?;

        trace!(program = %program, code = ?output.status.code(), "Command finished");

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
