//! Workflow run context
//!
//! Reads the event payload written by the runner and the target repository.

use crate::error::{ConfigError, FetchError};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Event payload of the triggering workflow event
#[derive(Debug, Clone, Deserialize)]
pub struct EventPayload {
    /// Present for `pull_request` and `pull_request_target` events
    pub pull_request: Option<PullRequest>,
}

/// Pull request section of the event payload
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    /// Pull request number
    pub number: u64,
    /// Pull request author
    pub user: User,
}

/// A GitHub account
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub login: String,
}

impl EventPayload {
    /// Load the event payload from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, FetchError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FetchError::generic(format!(
                "failed to read event payload {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Parse the event payload from JSON
    pub fn from_json(content: &str) -> Result<Self, FetchError> {
        serde_json::from_str(content)
            .map_err(|e| FetchError::generic(format!("failed to parse event payload: {}", e)))
    }
}

/// Repository in `owner/repo` form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl FromStr for Repository {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(ConfigError::InvalidRepository {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
