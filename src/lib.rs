//! fetch-metadata - Dependabot metadata extraction library
//!
//! This library provides the core functionality for reading the metadata
//! block Dependabot embeds in its commit messages:
//! - Locating and parsing the `updated-dependencies` block
//! - Aggregating the records into step output values
//! - Retrieving verified commit messages from the GitHub API
//! - Publishing outputs for GitHub Actions

pub mod cli;
pub mod domain;
pub mod error;
pub mod github;
pub mod metadata;
pub mod orchestrator;
pub mod output;
