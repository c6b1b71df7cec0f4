//! Commit message sources
//!
//! This module provides:
//! - GitHub API client with retry logic
//! - Workflow event payload and repository context
//! - Verified Dependabot commit retrieval
//! - A static source reading a message from a file or stdin

mod client;
mod commits;
mod event;

pub use client::{GithubClient, DEFAULT_API_URL};
pub use commits::VerifiedCommits;
pub use event::{EventPayload, PullRequest, Repository, User};

use crate::error::{ConfigError, FetchError};
use async_trait::async_trait;
use std::io::Read;
use std::path::Path;

/// Login of the Dependabot app account
pub const DEPENDABOT_LOGIN: &str = "dependabot[bot]";

/// Trait for commit message sources
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Fetch the commit message for the current run
    ///
    /// Returns `None` when the run does not concern a Dependabot commit.
    async fn fetch_message(&self) -> Result<Option<String>, FetchError>;
}

/// Message source returning a fixed message
#[derive(Debug, Clone)]
pub struct StaticMessage {
    message: String,
}

impl StaticMessage {
    /// Create a source for the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Read the message from a file, or from stdin when the path is `-`
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let to_config_error = |source| ConfigError::MessageFile {
            path: path.to_path_buf(),
            source,
        };

        let message = if path == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(to_config_error)?;
            buf
        } else {
            std::fs::read_to_string(path).map_err(to_config_error)?
        };

        Ok(Self::new(message))
    }
}

#[async_trait]
impl MessageSource for StaticMessage {
    async fn fetch_message(&self) -> Result<Option<String>, FetchError> {
        Ok(Some(self.message.clone()))
    }
}
