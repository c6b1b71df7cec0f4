//! CLI argument parsing module for fetch-metadata
//!
//! Every option falls back to the environment variable the Actions runner
//! sets, so the binary runs as a step without arguments.

use crate::error::ConfigError;
use crate::github::{Repository, DEFAULT_API_URL};
use clap::Parser;
use std::path::PathBuf;

/// Extract Dependabot metadata from a pull request's commit message
#[derive(Parser, Debug, Clone)]
#[command(
    name = "fetch-metadata",
    version,
    about = "Extract Dependabot metadata for GitHub Actions"
)]
pub struct CliArgs {
    /// Token used to read the pull request's commits
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Repository in owner/repo form
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Path to the workflow event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// File receiving step outputs (printed to stdout when unset)
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub output_file: Option<PathBuf>,

    /// Parse a commit message from this file ('-' for stdin) instead of the API
    #[arg(long)]
    pub commit_message_file: Option<PathBuf>,

    /// Print a JSON report of the run to stdout
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Enable quiet mode - warnings and errors only
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Returns the token, falling back to `GITHUB_TOKEN`
    pub fn token(&self) -> Result<String, ConfigError> {
        self.github_token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)
    }

    /// Returns the parsed repository
    pub fn repository(&self) -> Result<Repository, ConfigError> {
        self.repository
            .as_deref()
            .ok_or(ConfigError::MissingRepository)?
            .parse()
    }

    /// Returns the event payload path
    pub fn event_path(&self) -> Result<PathBuf, ConfigError> {
        self.event_path.clone().ok_or(ConfigError::MissingEventPath)
    }

    /// Returns the default log level for the verbosity flags
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            log::LevelFilter::Warn
        } else if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}
