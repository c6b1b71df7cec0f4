//! Step output publishing
//!
//! This module provides:
//! - The `OutputSink` boundary used by the orchestrator
//! - GitHub Actions rendering (workflow commands and `GITHUB_OUTPUT`)
//! - An in-memory sink for embedding and tests
//! - JSON reporting of a run outcome

mod actions;
mod json;

pub use actions::ActionsOutput;
pub use json::JsonReport;

use crate::domain::{pluralize, MetadataSummary};
use crate::error::OutputError;

/// Output key for the full record array
pub const UPDATED_DEPENDENCIES_JSON: &str = "updated-dependencies-json";
/// Output key for the joined dependency names
pub const DEPENDENCY_NAMES: &str = "dependency-names";
/// Output key for the last record's dependency type
pub const DEPENDENCY_TYPE: &str = "dependency-type";
/// Output key for the last record's update type
pub const UPDATE_TYPE: &str = "update-type";

/// Trait for caller-visible output channels
pub trait OutputSink {
    /// Write an informational line
    fn info(&mut self, message: &str) -> Result<(), OutputError>;

    /// Open a collapsible log group
    fn start_group(&mut self, title: &str) -> Result<(), OutputError>;

    /// Close the current log group
    fn end_group(&mut self) -> Result<(), OutputError>;

    /// Set a step output value
    fn set_output(&mut self, key: &str, value: &str) -> Result<(), OutputError>;

    /// Set several step outputs together
    ///
    /// Sinks that persist outputs override this to write them at once.
    fn set_outputs(&mut self, outputs: &[(&str, &str)]) -> Result<(), OutputError> {
        for (key, value) in outputs {
            self.set_output(key, value)?;
        }
        Ok(())
    }

    /// Report the run as failed
    fn set_failed(&mut self, message: &str) -> Result<(), OutputError>;
}

/// Publish a summary as step outputs
///
/// All values are rendered and validated before anything is written, so a
/// failure never leaves a partial set of outputs behind.
pub fn publish(summary: &MetadataSummary, sink: &mut dyn OutputSink) -> Result<(), OutputError> {
    let records_json = summary
        .records_json()
        .map_err(|e| OutputError::Serialize {
            key: UPDATED_DEPENDENCIES_JSON.to_string(),
            message: e.to_string(),
        })?;

    let outputs = [
        (UPDATED_DEPENDENCIES_JSON, records_json.as_str()),
        (DEPENDENCY_NAMES, summary.joined_names.as_str()),
        (DEPENDENCY_TYPE, summary.last_dependency_type.as_str()),
        (UPDATE_TYPE, summary.last_update_type.as_str()),
    ];

    if let Some((key, _)) = outputs.iter().find(|(_, value)| is_multiline(value)) {
        return Err(OutputError::MultilineValue {
            key: key.to_string(),
        });
    }

    sink.start_group(&format!(
        "Outputting metadata for {}",
        pluralize(summary.count())
    ))?;
    for (key, value) in &outputs {
        sink.info(&format!("outputs.{}: {}", key, value))?;
    }
    sink.set_outputs(&outputs)?;
    sink.end_group()
}

/// Returns true if the value would break a `key=value` line
pub(crate) fn is_multiline(value: &str) -> bool {
    value.contains(['\n', '\r'])
}

/// Sink that records everything in memory
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryOutput {
    /// Informational lines
    pub infos: Vec<String>,
    /// Group titles, in the order they were opened
    pub groups: Vec<String>,
    /// Output key/value pairs, in the order they were set
    pub outputs: Vec<(String, String)>,
    /// Failure messages
    pub failures: Vec<String>,
}

impl MemoryOutput {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of an output
    pub fn output(&self, key: &str) -> Option<&str> {
        self.outputs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl OutputSink for MemoryOutput {
    fn info(&mut self, message: &str) -> Result<(), OutputError> {
        self.infos.push(message.to_string());
        Ok(())
    }

    fn start_group(&mut self, title: &str) -> Result<(), OutputError> {
        self.groups.push(title.to_string());
        Ok(())
    }

    fn end_group(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn set_output(&mut self, key: &str, value: &str) -> Result<(), OutputError> {
        self.outputs.push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn set_failed(&mut self, message: &str) -> Result<(), OutputError> {
        self.failures.push(message.to_string());
        Ok(())
    }
}
