//! External process invocation
//!
//! The build tool, the cleanup command and the release-hosting CLI are all
//! plain subprocesses. They are run through the [CommandRunner] trait so the
//! release workflow can be exercised without spawning anything:
//!
//! - [system::SystemRunner]: runs commands with `std::process::Command`
//! - [mock::RecordingRunner]: records invocations, optionally failing some

pub mod mock;
pub mod system;

pub use mock::RecordingRunner;
pub use system::SystemRunner;

use crate::error::Result;
use std::fmt;

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Build an invocation from an argv-style list, first element being the program
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Invocation::new(program.clone(), args.iter().cloned()))
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {:?}", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Captured output of a successful command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs external commands to completion.
///
/// Implementations block until the command exits. A non-zero exit status or
/// a failure to spawn is returned as [crate::error::ReleaseError::CommandFailed].
pub trait CommandRunner: Send + Sync {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_display() {
        let inv = Invocation::new("latexmk", ["-pdf", "-interaction=nonstopmode", "main.tex"]);
        assert_eq!(
            inv.to_string(),
            "latexmk -pdf -interaction=nonstopmode main.tex"
        );
    }

    #[test]
    fn test_invocation_display_quotes_spaces() {
        let inv = Invocation::new("gh", ["release", "create", "1.0.0", "--title", "Release 1.0.0"]);
        assert_eq!(
            inv.to_string(),
            "gh release create 1.0.0 --title \"Release 1.0.0\""
        );
    }

    #[test]
    fn test_invocation_from_argv() {
        let argv = vec!["git".to_string(), "clean".to_string(), "-fdX".to_string()];
        let inv = Invocation::from_argv(&argv).unwrap();
        assert_eq!(inv.program, "git");
        assert_eq!(inv.args, vec!["clean", "-fdX"]);
        assert!(Invocation::from_argv(&[]).is_none());
    }

    #[test]
    fn test_invocation_arg() {
        let inv = Invocation::new("latexmk", ["-pdf"]).arg("main.tex");
        assert_eq!(inv.args, vec!["-pdf", "main.tex"]);
    }
}
