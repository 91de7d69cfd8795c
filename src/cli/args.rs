use clap::Parser;

use crate::cli::orchestration::ReleaseWorkflowArgs;
use crate::domain::BumpMode;

#[derive(Debug, Parser)]
#[command(
    name = "tex-release",
    version,
    about = "Build a LaTeX document, bump its version and publish a tagged release"
)]
pub struct Args {
    /// Which version component to increment
    #[arg(value_enum)]
    pub mode: BumpMode,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(long, help = "Remote to fetch tags from and push to (overrides config)")]
    pub remote: Option<String>,

    #[arg(long, help = "Preview what would happen without making changes")]
    pub dry_run: bool,

    #[arg(long, help = "Commit the release without pushing it")]
    pub no_push: bool,

    #[arg(long, help = "Skip publishing the release")]
    pub no_publish: bool,

    #[arg(long, help = "Print the output of external commands")]
    pub verbose: bool,
}

impl Args {
    pub fn workflow_args(&self) -> ReleaseWorkflowArgs {
        ReleaseWorkflowArgs {
            mode: self.mode,
            remote: self.remote.clone(),
            dry_run: self.dry_run,
            no_push: self.no_push,
            no_publish: self.no_publish,
        }
    }
}
