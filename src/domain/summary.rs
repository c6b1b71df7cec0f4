//! Aggregated metadata summary
//!
//! Reduces the parsed records into the flat values published as step outputs.

use super::UpdatedDependency;
use serde::Serialize;

/// Delimiter used between dependency names
pub const NAME_DELIMITER: &str = ", ";

/// Summary of all dependencies updated by a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataSummary {
    /// Every record, in the order declared in the commit message
    pub records: Vec<UpdatedDependency>,
    /// Dependency names joined with `", "`
    pub joined_names: String,
    /// Dependency type of the last record
    pub last_dependency_type: String,
    /// Update type of the last record
    pub last_update_type: String,
}

impl MetadataSummary {
    /// Aggregates a set of records, or returns `None` when it is empty
    ///
    /// The scalar type fields are taken from the final record: when a batch
    /// touches several dependencies, the last one is reported as the headline.
    pub fn aggregate(records: Vec<UpdatedDependency>) -> Option<Self> {
        let last = records.last()?;
        let last_dependency_type = last.dependency_type.clone();
        let last_update_type = last.update_type.clone();

        let joined_names = records
            .iter()
            .map(|r| r.dependency_name.as_str())
            .collect::<Vec<_>>()
            .join(NAME_DELIMITER);

        Some(Self {
            records,
            joined_names,
            last_dependency_type,
            last_update_type,
        })
    }

    /// Returns the number of records
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Returns the records as a compact JSON array
    pub fn records_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.records)
    }
}

/// Formats a count with the singular or plural noun for updated dependencies
pub fn pluralize(count: usize) -> String {
    if count == 1 {
        format!("{} updated dependency", count)
    } else {
        format!("{} updated dependencies", count)
    }
}
