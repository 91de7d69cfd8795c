use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::TagPattern;
use crate::error::{ReleaseError, Result};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "texrelease.toml";

/// File name looked up in the user config directory
pub const USER_CONFIG_FILE: &str = ".texrelease.toml";

/// Represents the complete configuration for tex-release.
///
/// Every field has a default, and the defaults reproduce the plain
/// clean / latexmk / commit / push / `gh release` sequence, so an absent
/// file is a valid configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub clean: CleanConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub release: ReleaseConfig,
}

fn default_document() -> String {
    "main.tex".to_string()
}

fn default_build_command() -> Vec<String> {
    vec![
        "latexmk".to_string(),
        "-pdf".to_string(),
        "-interaction=nonstopmode".to_string(),
    ]
}

fn default_artifact() -> String {
    "main.pdf".to_string()
}

/// How the document is compiled and which file gets attached to the release.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BuildConfig {
    /// Root TeX source, appended as the last argument of `command`
    #[serde(default = "default_document")]
    pub document: String,

    #[serde(default = "default_build_command")]
    pub command: Vec<String>,

    /// Compiled file attached to the published release
    #[serde(default = "default_artifact")]
    pub artifact: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            document: default_document(),
            command: default_build_command(),
            artifact: default_artifact(),
        }
    }
}

fn default_clean_command() -> Vec<String> {
    vec!["git".to_string(), "clean".to_string(), "-fdX".to_string()]
}

/// Command that removes auxiliary build files before and after the release.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CleanConfig {
    #[serde(default = "default_clean_command")]
    pub command: Vec<String>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        CleanConfig {
            command: default_clean_command(),
        }
    }
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_tag_pattern() -> String {
    "{version}".to_string()
}

fn default_commit_message() -> String {
    "Prepare for tag release {tag}.\n".to_string()
}

/// Source-control settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Tag naming template, must contain `{version}`
    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,

    /// Commit message template, `{tag}` and `{version}` are substituted
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    #[serde(default)]
    pub allow_empty_commit: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            remote: default_remote(),
            tag_pattern: default_tag_pattern(),
            commit_message: default_commit_message(),
            allow_empty_commit: false,
        }
    }
}

impl GitConfig {
    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(self.tag_pattern.as_str())
    }
}

fn default_true() -> bool {
    true
}

fn default_release_program() -> String {
    "gh".to_string()
}

fn default_release_title() -> String {
    "Release {tag}".to_string()
}

/// Release-hosting settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Release CLI, invoked as `<program> release create ...`
    #[serde(default = "default_release_program")]
    pub program: String,

    /// Release title template, `{tag}` and `{version}` are substituted
    #[serde(default = "default_release_title")]
    pub title: String,

    #[serde(default = "default_true")]
    pub generate_notes: bool,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            enabled: true,
            program: default_release_program(),
            title: default_release_title(),
            generate_notes: true,
        }
    }
}

impl Config {
    /// Check the settings that cannot be expressed through serde defaults
    pub fn validate(&self) -> Result<()> {
        if self.build.command.is_empty() {
            return Err(ReleaseError::config("build.command must not be empty"));
        }
        if self.clean.command.is_empty() {
            return Err(ReleaseError::config("clean.command must not be empty"));
        }
        if self.git.remote.trim().is_empty() {
            return Err(ReleaseError::config("git.remote must not be empty"));
        }
        if self.release.enabled && self.release.program.trim().is_empty() {
            return Err(ReleaseError::config("release.program must not be empty"));
        }
        self.git
            .tag_pattern()
            .map_err(|e| ReleaseError::config(format!("git.tag_pattern: {}", e)))?;
        Ok(())
    }
}

/// Substitute `{tag}` and `{version}` in a message template
pub fn render_template(template: &str, tag: &str, version: &str) -> String {
    template.replace("{tag}", tag).replace("{version}", version)
}

/// Finds the configuration file to use, if any.
///
/// Lookup order:
/// 1. Custom path provided as parameter
/// 2. `texrelease.toml` in the project root (the repository work tree)
/// 3. `.texrelease.toml` in user config directory
pub fn find_config_file(config_path: Option<&str>, project_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(PathBuf::from(path));
    }

    let local = project_dir.join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}

/// Loads configuration from file or returns defaults.
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `project_dir` - Directory searched for `texrelease.toml`
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>, project_dir: &Path) -> Result<Config> {
    let config = match find_config_file(config_path, project_dir) {
        Some(path) => {
            let config_str = fs::read_to_string(&path).map_err(|e| {
                ReleaseError::config(format!("Cannot read {}: {}", path.display(), e))
            })?;
            parse_config(&config_str)
                .map_err(|e| ReleaseError::config(format!("{}: {}", path.display(), e)))?
        }
        None => Config::default(),
    };

    config.validate()?;
    Ok(config)
}

/// Parse configuration from TOML text
pub fn parse_config(text: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(text)
}
