//! Core domain models for fetch-metadata
//!
//! This module contains:
//! - The updated dependency record parsed from a commit message
//! - The aggregated summary published as step outputs

mod dependency;
mod summary;

pub use dependency::UpdatedDependency;
pub use summary::{pluralize, MetadataSummary, NAME_DELIMITER};
