//! Shell command execution with captured output
//!
//! [`Executor`] runs one command at a time and keeps the stdout and stderr
//! of the most recent run. A non-zero exit code is a normal outcome; only a
//! failure to start the process at all is an error.

use std::process::Command;

use thiserror::Error;
use tracing::debug;

/// Classification of [`ExecError`] variants
///
/// Each kind maps to a stable error code usable for programmatic handling
/// and tests, on the same scheme as the comparison errors in `kindred-core`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecErrorKind {
    /// The process could not be spawned.
    Spawn,
    /// An argv form with no program name.
    Empty,
}

impl ExecErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExecErrorKind::Spawn => "ERR_SPAWN",
            ExecErrorKind::Empty => "ERR_EMPTY",
        }
    }
}

/// Failure to launch a command.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The process could not be spawned, for example because the program
    /// does not exist.
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    /// An argv form with no program name.
    #[error("empty command line")]
    Empty,
}

impl ExecError {
    /// Get the error kind
    pub fn kind(&self) -> ExecErrorKind {
        match self {
            ExecError::Spawn { .. } => ExecErrorKind::Spawn,
            ExecError::Empty => ExecErrorKind::Empty,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}

/// Runs commands and retains the output of the latest one.
#[derive(Debug, Default)]
pub struct Executor {
    out: String,
    err: String,
}

impl Executor {
    pub fn new() -> Self {
        Executor::default()
    }

    /// Run a command line through the platform shell (`sh -c` on unix,
    /// `cmd /C` on windows) and return its exit code.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::Spawn`] when the shell itself cannot be started.
    pub fn exec(&mut self, command_line: &str) -> Result<i32, ExecError> {
        self.run(shell(command_line), command_line)
    }

    /// Run an explicit argv without shell interpretation.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::Empty`] for an empty argv and
    /// [`ExecError::Spawn`] when the program cannot be started.
    pub fn exec_argv(&mut self, argv: &[&str]) -> Result<i32, ExecError> {
        let (program, args) = argv.split_first().ok_or(ExecError::Empty)?;
        let mut command = Command::new(program);
        command.args(args);
        self.run(command, &argv.join(" "))
    }

    /// Stdout of the most recent run.
    pub fn out(&self) -> &str {
        &self.out
    }

    /// Stderr of the most recent run.
    pub fn err(&self) -> &str {
        &self.err
    }

    fn run(&mut self, mut command: Command, rendered: &str) -> Result<i32, ExecError> {
        let output = command.output().map_err(|source| ExecError::Spawn {
            command: rendered.to_string(),
            source,
        })?;
        self.out = String::from_utf8_lossy(&output.stdout).into_owned();
        self.err = String::from_utf8_lossy(&output.stderr).into_owned();
        // A termination without an exit code (killed by signal) reads as -1.
        let code = output.status.code().unwrap_or(-1);
        debug!(command = rendered, exit = code, "command finished");
        Ok(code)
    }
}

#[cfg(unix)]
fn shell(command_line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(command_line);
    command
}

#[cfg(windows)]
fn shell(command_line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", command_line]);
    command
}
