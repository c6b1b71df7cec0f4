//! Application error types using thiserror
//!
//! Error hierarchy:
//! - FetchError: Failures while retrieving the commit message
//! - ConfigError: Missing or malformed configuration
//! - OutputError: Failures while publishing step outputs

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Commit message retrieval errors
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Output related errors
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Errors raised while retrieving the commit message
///
/// The kind is decided where the request is made: `Api` for a non-success
/// response from the GitHub API, `Generic` for everything else.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The API answered with an error status
    #[error("Api Error: ({status}) {message}")]
    Api { status: u16, message: String },

    /// Any other failure (transport, payload, decoding)
    #[error("{message}")]
    Generic { message: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No token was provided
    #[error("github-token is not set! Please add 'github-token: \"${{{{ secrets.GITHUB_TOKEN }}}}\"' to your workflow file.")]
    MissingToken,

    /// No repository was provided
    #[error("repository is not set: expected GITHUB_REPOSITORY or --repository")]
    MissingRepository,

    /// Repository is not in `owner/repo` form
    #[error("invalid repository '{value}': expected 'owner/repo'")]
    InvalidRepository { value: String },

    /// No event payload path was provided
    #[error("event payload path is not set: expected GITHUB_EVENT_PATH or --event-path")]
    MissingEventPath,

    /// Failed to read the commit message file
    #[error("failed to read commit message from {path}: {source}")]
    MessageFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to publishing outputs
#[derive(Error, Debug)]
pub enum OutputError {
    /// Failed to write to the output file or stream
    #[error("failed to write output '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Output values must fit on one line
    #[error("output '{key}' contains a line break")]
    MultilineValue { key: String },

    /// Failed to serialize the records
    #[error("failed to serialize output '{key}': {message}")]
    Serialize { key: String, message: String },
}

impl FetchError {
    /// Creates a new Api error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        FetchError::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates a new Generic error
    pub fn generic(message: impl Into<String>) -> Self {
        FetchError::Generic {
            message: message.into(),
        }
    }

    /// Returns the HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Api { status, .. } => Some(*status),
            FetchError::Generic { .. } => None,
        }
    }
}

impl OutputError {
    /// Creates a new Write error
    pub fn write(key: impl Into<String>, source: std::io::Error) -> Self {
        OutputError::Write {
            key: key.into(),
            source,
        }
    }
}
