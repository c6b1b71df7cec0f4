//! Updated dependency records

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single dependency change declared in a commit's metadata block
///
/// Field values are opaque labels taken verbatim from the commit message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedDependency {
    /// Package name (e.g. `coffee-rails`)
    pub dependency_name: String,
    /// Dependency classification (e.g. `direct:production`, `indirect`)
    pub dependency_type: String,
    /// Kind of version change (e.g. `version-update:semver-minor`)
    pub update_type: String,
}

impl UpdatedDependency {
    /// Creates a new updated dependency record
    pub fn new(
        dependency_name: impl Into<String>,
        dependency_type: impl Into<String>,
        update_type: impl Into<String>,
    ) -> Self {
        Self {
            dependency_name: dependency_name.into(),
            dependency_type: dependency_type.into(),
            update_type: update_type.into(),
        }
    }

    /// Builds a record from optional fields, returning `None` unless all
    /// three are present and non-empty
    pub fn from_parts(
        dependency_name: Option<String>,
        dependency_type: Option<String>,
        update_type: Option<String>,
    ) -> Option<Self> {
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

        Some(Self {
            dependency_name: non_empty(dependency_name)?,
            dependency_type: non_empty(dependency_type)?,
            update_type: non_empty(update_type)?,
        })
    }
}

impl fmt::Display for UpdatedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.dependency_name, self.dependency_type, self.update_type
        )
    }
}
