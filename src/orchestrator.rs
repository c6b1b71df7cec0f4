//! Metadata orchestrator for coordinating a single run
//!
//! This module provides:
//! - Workflow coordination: fetch message → parse → aggregate → publish
//! - Informational outcomes for runs with no message or no metadata
//! - Conversion of any failure into one terminal failure report

use crate::domain::MetadataSummary;
use crate::error::{AppError, FetchError};
use crate::github::MessageSource;
use crate::metadata;
use crate::output::{publish, OutputSink};

/// Message reported when the run does not concern a Dependabot commit
pub const NO_MESSAGE_INFO: &str = "PR is not from Dependabot, nothing to do.";

/// Message reported when the commit carries no metadata
pub const NO_METADATA_INFO: &str = "PR does not contain metadata, nothing to do.";

/// Terminal state of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No verified Dependabot commit message was available
    NoMessage,
    /// The message carried no updated dependencies
    NoMetadata,
    /// The summary was published
    Published(MetadataSummary),
    /// The run failed with the given report
    Failed(String),
}

impl RunOutcome {
    /// Returns true if the run failed
    pub fn is_failure(&self) -> bool {
        matches!(self, RunOutcome::Failed(_))
    }
}

/// Orchestrator for one metadata run
pub struct Orchestrator {
    /// Where the commit message comes from
    source: Box<dyn MessageSource>,
}

impl Orchestrator {
    /// Create a new orchestrator reading from the given source
    pub fn new(source: Box<dyn MessageSource>) -> Self {
        Self { source }
    }

    /// Run the workflow, reporting everything through the sink
    pub async fn run(&self, sink: &mut dyn OutputSink) -> RunOutcome {
        match self.process(sink).await {
            Ok(outcome) => outcome,
            Err(err) => {
                let report = failure_report(&err);
                if let Err(e) = sink.set_failed(&report) {
                    log::error!("failed to report failure: {}", e);
                }
                RunOutcome::Failed(report)
            }
        }
    }

    async fn process(&self, sink: &mut dyn OutputSink) -> Result<RunOutcome, AppError> {
        // Step 1: Fetch the verified commit message
        let message = match self.source.fetch_message().await? {
            Some(message) if !message.is_empty() => message,
            _ => {
                sink.info(NO_MESSAGE_INFO)?;
                return Ok(RunOutcome::NoMessage);
            }
        };

        // Step 2: Locate and parse the metadata block
        sink.info("Parsing Dependabot metadata")?;
        let records = metadata::parse(&message);

        // Step 3: Aggregate and publish
        let Some(summary) = MetadataSummary::aggregate(records) else {
            sink.info(NO_METADATA_INFO)?;
            return Ok(RunOutcome::NoMetadata);
        };

        publish(&summary, sink)?;
        Ok(RunOutcome::Published(summary))
    }
}

/// Render the operator-facing failure report
///
/// API failures carry their status; every other failure is its message.
pub fn failure_report(err: &AppError) -> String {
    match err {
        AppError::Fetch(FetchError::Api { status, message }) => {
            format!("Api Error: ({}) {}", status, message)
        }
        AppError::Fetch(FetchError::Generic { message }) => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::StaticMessage;
    use crate::output::{MemoryOutput, DEPENDENCY_NAMES};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FixedSource {
        result: Result<Option<String>, FetchError>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl MessageSource for FixedSource {
        async fn fetch_message(&self) -> Result<Option<String>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn orchestrator(result: Result<Option<String>, FetchError>) -> Orchestrator {
        Orchestrator::new(Box::new(FixedSource {
            result,
            calls: Arc::new(AtomicUsize::new(0)),
        }))
    }

    const MESSAGE: &str = "Bump rack\n---\nupdated-dependencies:\n- dependency-name: rack\n  dependency-type: indirect\n  update-type: version-update:semver-patch\n...\n";

    #[tokio::test]
    async fn test_published() {
        let mut sink = MemoryOutput::new();
        let outcome = Orchestrator::new(Box::new(StaticMessage::new(MESSAGE)))
            .run(&mut sink)
            .await;

        assert!(matches!(outcome, RunOutcome::Published(ref s) if s.joined_names == "rack"));
        assert_eq!(sink.output(DEPENDENCY_NAMES), Some("rack"));
        assert!(sink.failures.is_empty());
    }

    #[tokio::test]
    async fn test_no_message() {
        let mut sink = MemoryOutput::new();
        let outcome = orchestrator(Ok(None)).run(&mut sink).await;

        assert_eq!(outcome, RunOutcome::NoMessage);
        assert_eq!(sink.infos, vec![NO_MESSAGE_INFO]);
        assert!(sink.outputs.is_empty());
    }

    #[tokio::test]
    async fn test_empty_message_is_no_message() {
        let mut sink = MemoryOutput::new();
        let outcome = orchestrator(Ok(Some(String::new()))).run(&mut sink).await;
        assert_eq!(outcome, RunOutcome::NoMessage);
    }

    #[tokio::test]
    async fn test_no_metadata() {
        let mut sink = MemoryOutput::new();
        let outcome = orchestrator(Ok(Some("Just a commit message".to_string())))
            .run(&mut sink)
            .await;

        assert_eq!(outcome, RunOutcome::NoMetadata);
        assert!(sink.infos.contains(&NO_METADATA_INFO.to_string()));
        assert!(sink.outputs.is_empty());
        assert!(!outcome.is_failure());
    }

    #[tokio::test]
    async fn test_api_failure() {
        let mut sink = MemoryOutput::new();
        let outcome = orchestrator(Err(FetchError::api(500, "Something bad happened!")))
            .run(&mut sink)
            .await;

        assert_eq!(
            outcome,
            RunOutcome::Failed("Api Error: (500) Something bad happened!".to_string())
        );
        assert_eq!(sink.failures, vec!["Api Error: (500) Something bad happened!"]);
        assert!(sink.outputs.is_empty());
    }

    #[tokio::test]
    async fn test_generic_failure() {
        let mut sink = MemoryOutput::new();
        let outcome = orchestrator(Err(FetchError::generic("Something bad happened!")))
            .run(&mut sink)
            .await;

        assert_eq!(outcome, RunOutcome::Failed("Something bad happened!".to_string()));
        assert!(outcome.is_failure());
    }

    #[tokio::test]
    async fn test_source_called_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let orchestrator = Orchestrator::new(Box::new(FixedSource {
            result: Ok(None),
            calls: calls.clone(),
        }));
        orchestrator.run(&mut MemoryOutput::new()).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
