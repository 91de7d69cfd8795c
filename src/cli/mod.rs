//! Command-line front end: argument definitions and the release workflow

pub mod args;
pub mod orchestration;

pub use args::Args;
pub use orchestration::{run_release_workflow, ReleaseWorkflowArgs, WorkflowResult};
