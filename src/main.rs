use anyhow::Result;
use clap::Parser;

use tex_release::cli::{run_release_workflow, Args};
use tex_release::config;
use tex_release::git::Git2Repository;
use tex_release::process::SystemRunner;
use tex_release::ui;

fn main() -> Result<()> {
    let args = Args::parse();

    let repo = match Git2Repository::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    // External commands run from the repository root, like the paths in the config
    let workdir = match repo.workdir() {
        Some(dir) => dir.to_path_buf(),
        None => {
            ui::display_error("Cannot release from a bare repository");
            std::process::exit(1);
        }
    };

    // Load configuration, the project file lives at the repository root
    let config = match config::load_config(args.config.as_deref(), &workdir) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let runner = SystemRunner::new()
        .in_dir(&workdir)
        .verbose(args.verbose);

    match run_release_workflow(&args.workflow_args(), &config, &repo, &runner, &workdir) {
        Ok(result) if args.dry_run => {
            ui::display_success(&format!("Dry run finished, next tag would be {}", result.tag));
        }
        Ok(result) => {
            ui::display_success(&format!(
                "Released {}",
                ui::formatter::version_change_line(result.previous_tag.as_deref(), &result.tag)
            ));
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }

    Ok(())
}
