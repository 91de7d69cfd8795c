use crate::error::{ReleaseError, Result};
use crate::process::{CommandOutput, CommandRunner, Invocation};
use std::path::PathBuf;
use std::process::Command;

/// Runs commands as real subprocesses
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    working_dir: Option<PathBuf>,
    verbose: bool,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every command inside `dir` instead of the current directory
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Echo each command's stdout after it finishes
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl CommandRunner for SystemRunner {
    /// Execute a command and capture its output
    ///
    /// # Returns
    /// * `Ok(CommandOutput)` if the command exits with code 0
    /// * `Err` if the program cannot be spawned or exits non-zero
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| ReleaseError::CommandFailed {
            command: invocation.to_string(),
            code: -1,
            stderr: format!("failed to start: {}", e),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            // latexmk reports most errors on stdout, keep it when stderr is empty
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(ReleaseError::CommandFailed {
                command: invocation.to_string(),
                code: output.status.code().unwrap_or(-1),
                stderr: detail,
            });
        }

        if self.verbose && !stdout.is_empty() {
            println!("{}", stdout);
        }

        Ok(CommandOutput { stdout, stderr })
    }
}
