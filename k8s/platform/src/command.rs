use crate::common::error::{CommandFailed, CommandSpawn, Result, U8VectorToString};
use snafu::{ensure, ResultExt};
use std::{
    fmt,
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
    str,
};
use tracing::debug;

/// A single invocation of an external binary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
}

impl ExternalCommand {
    /// Creates a command for the program, with no arguments.
    pub fn new<P>(program: P) -> Self
    where
        P: ToString,
    {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Appends arguments.
    #[must_use]
    pub fn with_args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: ToString,
    {
        self.args.extend(args.into_iter().map(|arg| arg.to_string()));
        self
    }

    /// Runs the command from within the given directory.
    #[must_use]
    pub fn in_dir<P>(mut self, dir: P) -> Self
    where
        P: AsRef<Path>,
    {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// The binary which is executed.
    pub fn program(&self) -> &str {
        self.program.as_str()
    }

    /// The arguments, in order.
    pub fn args(&self) -> &[String] {
        self.args.as_slice()
    }

    /// The directory the command runs from, if not the current one.
    pub fn current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    fn command(&self) -> Command {
        let mut command = Command::new(self.program.as_str());
        command.args(self.args.as_slice());
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        command
    }

    /// Runs the command with inherited standard streams, and returns its exit status.
    pub fn status(&self) -> Result<ExitStatus> {
        debug!(command = %self.program, args = ?self.args, dir = ?self.current_dir, "Running command");

        self.command().status().context(CommandSpawn {
            command: self.program.clone(),
            args: self.args.clone(),
        })
    }

    /// Runs the command with inherited standard streams, failing if it exits unsuccessfully.
    pub fn check(&self) -> Result<()> {
        let status = self.status()?;
        ensure!(
            status.success(),
            CommandFailed {
                command: self.program.clone(),
                args: self.args.clone(),
                status: status.to_string(),
            }
        );

        Ok(())
    }

    /// Runs the command, capturing its standard output. Fails if it exits unsuccessfully.
    pub fn stdout(&self) -> Result<String> {
        debug!(command = %self.program, args = ?self.args, dir = ?self.current_dir, "Running command");

        let output = self.command().output().context(CommandSpawn {
            command: self.program.clone(),
            args: self.args.clone(),
        })?;

        let stdout_str = str::from_utf8(output.stdout.as_slice()).context(U8VectorToString)?;
        debug!(stdout=%stdout_str, "Command standard output");
        ensure!(
            output.status.success(),
            CommandFailed {
                command: self.program.clone(),
                args: self.args.clone(),
                status: output.status.to_string(),
            }
        );

        Ok(stdout_str.to_string())
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Maps an exit status onto the status this process should exit with. A child terminated by a
/// signal maps to 128 + the signal number, as a shell reports it.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
