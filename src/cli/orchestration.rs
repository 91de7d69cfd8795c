//! Release workflow orchestration
//!
//! Keeps the release sequence out of main.rs so it can be driven with mock
//! repositories and command runners.

use std::path::{Path, PathBuf};

use crate::boundary::BoundaryWarning;
use crate::config::{render_template, Config};
use crate::domain::{resolve_latest_version, BumpMode, ResolvedTag, Version};
use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use crate::process::{CommandRunner, Invocation};
use crate::ui;

/// Arguments for the release workflow
///
/// Mirrors the CLI Args without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseWorkflowArgs {
    /// Which version component to increment
    pub mode: BumpMode,

    /// Overrides `git.remote` from the configuration
    pub remote: Option<String>,

    /// Resolve the version and print the plan only
    pub dry_run: bool,

    /// Commit but do not push
    pub no_push: bool,

    /// Skip the release-hosting step
    pub no_publish: bool,
}

impl ReleaseWorkflowArgs {
    pub fn new(mode: BumpMode) -> Self {
        ReleaseWorkflowArgs {
            mode,
            remote: None,
            dry_run: false,
            no_push: false,
            no_publish: false,
        }
    }
}

/// Result of a release run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The tag the new version was computed from
    pub previous_tag: Option<String>,

    pub version: Version,

    /// The tag that was (or would be) released
    pub tag: String,

    /// Whether the release commit was pushed
    pub pushed: bool,

    /// Whether a release was published on the hosting service
    pub published: bool,
}

/// Cleanup and build commands derived from the configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BuildCommands {
    pub clean: Invocation,
    pub build: Invocation,
}

impl BuildCommands {
    pub fn from_config(config: &Config) -> Result<Self> {
        let clean = Invocation::from_argv(&config.clean.command)
            .ok_or_else(|| ReleaseError::config("clean.command must not be empty"))?;

        let build = Invocation::from_argv(&config.build.command)
            .ok_or_else(|| ReleaseError::config("build.command must not be empty"))?
            .arg(config.build.document.as_str());

        Ok(BuildCommands { clean, build })
    }
}

/// Release-hosting command for `tag`, `None` when publishing is off.
///
/// `target` is the pushed branch the hosting service creates the tag on.
/// Without one the service tags the head of its default branch, which does
/// not hold the release commit, so nothing is published.
pub fn publish_command(
    config: &Config,
    tag: &str,
    version: &Version,
    target: Option<&str>,
    publish: bool,
) -> Option<Invocation> {
    match target {
        Some(branch) if publish && config.release.enabled => {
            Some(publish_invocation(config, tag, version, branch))
        }
        _ => None,
    }
}

/// `gh release create <tag> <artifact> --title <title> --target <branch> [--generate-notes]`
fn publish_invocation(config: &Config, tag: &str, version: &Version, branch: &str) -> Invocation {
    let title = render_template(&config.release.title, tag, &version.to_string());

    let mut invocation = Invocation::new(
        config.release.program.as_str(),
        [
            "release",
            "create",
            tag,
            config.build.artifact.as_str(),
            "--title",
            title.as_str(),
            "--target",
            branch,
        ],
    );
    if config.release.generate_notes {
        invocation = invocation.arg("--generate-notes");
    }
    invocation
}

/// Fetch tags and resolve the version to bump from.
///
/// Fetch and lookup problems are reported as warnings and the version falls
/// back to 0.0.0 when no usable tag is found. Only an invalid tag pattern
/// is an error.
pub fn resolve_current_version<R: Repository>(
    repo: &R,
    remote: &str,
    config: &Config,
) -> Result<ResolvedTag> {
    let pattern = config.git.tag_pattern()?;

    if let Err(e) = repo.fetch_tags(remote) {
        ui::display_boundary_warning(&BoundaryWarning::FetchFailed {
            remote: remote.to_string(),
            reason: e.to_string(),
        });
    }

    let latest = match repo.latest_tag() {
        Ok(tag) => tag,
        Err(e) => {
            ui::display_boundary_warning(&BoundaryWarning::TagLookupFailed {
                reason: e.to_string(),
            });
            None
        }
    };

    let resolved = resolve_latest_version(latest.as_deref(), &pattern);
    if let Some(warning) = &resolved.warning {
        ui::display_boundary_warning(warning);
    }

    Ok(resolved)
}

fn run_step<C: CommandRunner>(runner: &C, status: &str, invocation: &Invocation) -> Result<()> {
    ui::display_status(status);
    ui::display_command(invocation);
    runner.run(invocation)?;
    Ok(())
}

/// Main release workflow
///
/// Orchestrates the entire release:
/// 1. Clean build artifacts
/// 2. Compile the document
/// 3. Fetch tags and resolve the latest version (0.0.0 if none)
/// 4. Bump the version and format the new tag
/// 5. Stage, commit and push
/// 6. Publish the release with the compiled artifact
/// 7. Clean build artifacts again
///
/// The first failing step aborts the run; nothing is rolled back.
///
/// # Arguments
///
/// * `args` - Workflow arguments (mode, remote, dry_run, ...)
/// * `config` - Release configuration
/// * `repo` - Source-control access
/// * `runner` - External command runner, relative paths resolve against `workdir`
/// * `workdir` - Directory the artifact path is resolved against
pub fn run_release_workflow<R: Repository, C: CommandRunner>(
    args: &ReleaseWorkflowArgs,
    config: &Config,
    repo: &R,
    runner: &C,
    workdir: &Path,
) -> Result<WorkflowResult> {
    let remote = args
        .remote
        .clone()
        .unwrap_or_else(|| config.git.remote.clone());

    if args.dry_run {
        return plan_release(args, config, repo, &remote);
    }

    let commands = BuildCommands::from_config(config)?;

    // Build first: a document that does not compile is never released
    run_step(runner, "Cleaning up the build directory...", &commands.clean)?;
    run_step(runner, "Compiling the TeX source code...", &commands.build)?;

    let resolved = resolve_current_version(repo, &remote, config)?;
    let version = resolved.version.bump(args.mode)?;
    let tag = config.git.tag_pattern()?.format(&version);

    ui::display_status(&format!("Bumping version (mode = {})...", args.mode));
    ui::display_proposed_tag(resolved.tag.as_deref(), &tag);

    let message = render_template(&config.git.commit_message, &tag, &version.to_string());
    ui::display_status("Committing changes...");
    repo.stage_all()?;
    let oid = repo.commit(&message, config.git.allow_empty_commit)?;
    ui::display_success(&format!("Created commit {}", short_oid(&oid.to_string())));

    let pushed_branch = if args.no_push {
        ui::display_status("Skipping push (--no-push)");
        None
    } else {
        let branch = repo.current_branch()?;
        ui::display_status(&format!("Pushing {} to {}...", branch, remote));
        repo.push_branch(&remote, &branch)?;
        ui::display_success(&format!("Pushed {} to {}", branch, remote));
        Some(branch)
    };

    let publish = publish_command(
        config,
        &tag,
        &version,
        pushed_branch.as_deref(),
        !args.no_publish,
    );
    let published = match publish {
        Some(publish) => {
            let artifact = artifact_path(workdir, &config.build.artifact);
            if !artifact.is_file() {
                return Err(ReleaseError::release(format!(
                    "Artifact {} was not produced by the build",
                    artifact.display()
                )));
            }
            run_step(runner, &format!("Publishing release {}...", tag), &publish)?;
            ui::display_success(&format!("Release {} created successfully.", tag));
            true
        }
        None if pushed_branch.is_none() && !args.no_publish && config.release.enabled => {
            ui::display_status("Skipping release publishing: the release commit was not pushed");
            false
        }
        None => {
            ui::display_status("Skipping release publishing");
            false
        }
    };

    run_step(
        runner,
        "Cleaning up the build directory again...",
        &commands.clean,
    )?;

    Ok(WorkflowResult {
        previous_tag: resolved.tag,
        version,
        tag,
        pushed: pushed_branch.is_some(),
        published,
    })
}

/// Dry run: resolve the version, print what would happen, touch nothing else
fn plan_release<R: Repository>(
    args: &ReleaseWorkflowArgs,
    config: &Config,
    repo: &R,
    remote: &str,
) -> Result<WorkflowResult> {
    let resolved = resolve_current_version(repo, remote, config)?;
    let version = resolved.version.bump(args.mode)?;
    let tag = config.git.tag_pattern()?.format(&version);
    let commands = BuildCommands::from_config(config)?;
    let branch = if args.no_push {
        None
    } else {
        Some(repo.current_branch()?)
    };
    let publish = publish_command(config, &tag, &version, branch.as_deref(), !args.no_publish);

    ui::display_proposed_tag(resolved.tag.as_deref(), &tag);

    let mut steps = vec![
        format!("run `{}`", commands.clean),
        format!("run `{}`", commands.build),
        format!(
            "commit all changes: {:?}",
            render_template(&config.git.commit_message, &tag, &version.to_string()).trim_end()
        ),
    ];
    if let Some(branch) = &branch {
        steps.push(format!("push {} to {}", branch, remote));
    }
    if let Some(publish) = &publish {
        steps.push(format!("run `{}`", publish));
    }
    steps.push(format!("run `{}`", commands.clean));
    ui::display_release_plan(&steps);

    Ok(WorkflowResult {
        previous_tag: resolved.tag,
        version,
        tag,
        pushed: false,
        published: false,
    })
}

fn artifact_path(workdir: &Path, artifact: &str) -> PathBuf {
    let path = Path::new(artifact);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        workdir.join(path)
    }
}

fn short_oid(oid: &str) -> &str {
    oid.get(..7).unwrap_or(oid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_commands_from_defaults() {
        let config = Config::default();
        let version = Version::new(1, 2, 4);
        let commands = BuildCommands::from_config(&config).unwrap();

        assert_eq!(commands.clean.to_string(), "git clean -fdX");
        assert_eq!(
            commands.build.to_string(),
            "latexmk -pdf -interaction=nonstopmode main.tex"
        );
        assert_eq!(
            publish_command(&config, "1.2.4", &version, Some("main"), true)
                .unwrap()
                .to_string(),
            "gh release create 1.2.4 main.pdf --title \"Release 1.2.4\" --target main --generate-notes"
        );
    }

    #[test]
    fn test_release_commands_without_publish() {
        let config = Config::default();
        let version = Version::new(1, 0, 0);
        assert!(publish_command(&config, "1.0.0", &version, Some("main"), false).is_none());

        let mut config = Config::default();
        config.release.enabled = false;
        assert!(publish_command(&config, "1.0.0", &version, Some("main"), true).is_none());
    }

    #[test]
    fn test_no_release_without_pushed_branch() {
        let config = Config::default();
        let version = Version::new(1, 0, 0);
        assert!(publish_command(&config, "1.0.0", &version, None, true).is_none());
    }

    #[test]
    fn test_publish_without_generated_notes() {
        let mut config = Config::default();
        config.release.generate_notes = false;
        config.release.title = "Thesis {version}".to_string();

        let invocation = publish_invocation(&config, "v2.0.0", &Version::new(2, 0, 0), "thesis");
        assert_eq!(
            invocation.args,
            vec![
                "release",
                "create",
                "v2.0.0",
                "main.pdf",
                "--title",
                "Thesis 2.0.0",
                "--target",
                "thesis"
            ]
        );
    }

    #[test]
    fn test_artifact_path() {
        let dir = Path::new("/work/paper");
        assert_eq!(artifact_path(dir, "main.pdf"), dir.join("main.pdf"));
        assert_eq!(
            artifact_path(dir, "/tmp/out.pdf"),
            PathBuf::from("/tmp/out.pdf")
        );
    }

    #[test]
    fn test_short_oid() {
        assert_eq!(short_oid("0123456789abcdef"), "0123456");
        assert_eq!(short_oid("abc"), "abc");
    }
}
