//! JSON report of a run outcome
//!
//! Used by `--json` to give scripts a single machine-readable document on
//! stdout; the workflow log moves to stderr in that mode.

use crate::domain::UpdatedDependency;
use crate::orchestrator::RunOutcome;
use serde::Serialize;
use std::io::Write;

/// JSON representation of a run
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct JsonReport<'a> {
    /// Terminal state of the run
    status: &'static str,
    /// Published records
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_dependencies: Option<&'a [UpdatedDependency]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dependency_names: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dependency_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    update_type: Option<&'a str>,
    /// Failure report
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl<'a> JsonReport<'a> {
    /// Build a report for an outcome
    pub fn from_outcome(outcome: &'a RunOutcome) -> Self {
        let empty = Self {
            status: "",
            updated_dependencies: None,
            dependency_names: None,
            dependency_type: None,
            update_type: None,
            error: None,
        };

        match outcome {
            RunOutcome::NoMessage => Self {
                status: "no_message",
                ..empty
            },
            RunOutcome::NoMetadata => Self {
                status: "no_metadata",
                ..empty
            },
            RunOutcome::Published(summary) => Self {
                status: "published",
                updated_dependencies: Some(&summary.records),
                dependency_names: Some(&summary.joined_names),
                dependency_type: Some(&summary.last_dependency_type),
                update_type: Some(&summary.last_update_type),
                error: None,
            },
            RunOutcome::Failed(report) => Self {
                status: "failed",
                error: Some(report),
                ..empty
            },
        }
    }

    /// Write the report as pretty-printed JSON
    pub fn write(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writeln!(writer)
    }
}
