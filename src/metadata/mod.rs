//! Dependabot commit metadata extraction
//!
//! This module provides:
//! - Block location between `---` and `...` marker lines
//! - Parsing of the `updated-dependencies` entries inside the block

mod block;
mod entry;

pub use block::locate_block;
pub use entry::parse_entries;

use crate::domain::UpdatedDependency;

/// Parses the updated dependencies declared in a commit message
///
/// Messages without a metadata block, or whose block carries no
/// `updated-dependencies` key, yield an empty set. Parsing never fails.
pub fn parse(message: &str) -> Vec<UpdatedDependency> {
    match locate_block(message) {
        Some(block) => parse_entries(block),
        None => Vec::new(),
    }
}
