use crate::error::{ReleaseError, Result};
use crate::process::{CommandOutput, CommandRunner, Invocation};
use std::collections::HashSet;
use std::sync::Mutex;

/// Command runner for testing without spawning processes
///
/// Every invocation is recorded. Programs registered with [RecordingRunner::fail_on]
/// fail with exit code 1 and are still recorded.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    invocations: Mutex<Vec<Invocation>>,
    failing: HashSet<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every invocation of `program` fail
    pub fn fail_on(mut self, program: impl Into<String>) -> Self {
        self.failing.insert(program.into());
        self
    }

    /// Everything run so far, in order
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Just the command lines, handy for asserting ordering
    pub fn command_lines(&self) -> Vec<String> {
        self.invocations().iter().map(|i| i.to_string()).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        if let Ok(mut calls) = self.invocations.lock() {
            calls.push(invocation.clone());
        }

        if self.failing.contains(&invocation.program) {
            return Err(ReleaseError::CommandFailed {
                command: invocation.to_string(),
                code: 1,
                stderr: "simulated failure".to_string(),
            });
        }

        Ok(CommandOutput::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let runner = RecordingRunner::new();
        runner.run(&Invocation::new("git", ["clean", "-fdX"])).unwrap();
        runner.run(&Invocation::new("latexmk", ["main.tex"])).unwrap();

        assert_eq!(
            runner.command_lines(),
            vec!["git clean -fdX", "latexmk main.tex"]
        );
    }

    #[test]
    fn test_fail_on_program() {
        let runner = RecordingRunner::new().fail_on("latexmk");
        assert!(runner.run(&Invocation::new("git", ["clean"])).is_ok());
        assert!(runner.run(&Invocation::new("latexmk", ["main.tex"])).is_err());
        assert_eq!(runner.invocations().len(), 2);
    }
}
