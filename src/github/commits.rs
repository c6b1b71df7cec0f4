//! Verified Dependabot commit retrieval
//!
//! Only returns a message when the pull request was opened by Dependabot and
//! its first commit is authored by Dependabot with a verified signature.

use crate::error::FetchError;
use crate::github::event::{EventPayload, Repository, User};
use crate::github::{GithubClient, MessageSource, DEPENDABOT_LOGIN};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;

/// Entry of the pull request commits listing
#[derive(Debug, Deserialize)]
struct PullRequestCommit {
    commit: CommitDetail,
    /// `null` when the author has no GitHub account
    author: Option<User>,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
    verification: Option<Verification>,
}

#[derive(Debug, Deserialize)]
struct Verification {
    verified: bool,
}

/// Message source backed by the GitHub pull request API
pub struct VerifiedCommits {
    client: GithubClient,
    repository: Repository,
    event_path: PathBuf,
}

impl VerifiedCommits {
    /// Create a new verified commits source
    pub fn new(client: GithubClient, repository: Repository, event_path: impl Into<PathBuf>) -> Self {
        Self {
            client,
            repository,
            event_path: event_path.into(),
        }
    }

    /// Build the API path listing a pull request's commits
    fn commits_path(&self, number: u64) -> String {
        format!(
            "repos/{}/{}/pulls/{}/commits",
            self.repository.owner, self.repository.name, number
        )
    }

    /// Verify the payload and fetch the first commit's message
    pub async fn message_for(&self, payload: &EventPayload) -> Result<Option<String>, FetchError> {
        log::debug!("Verifying the job is for an authentic Dependabot Pull Request");

        let Some(pr) = &payload.pull_request else {
            log::warn!(
                "Event payload missing `pull_request` key. Make sure you're triggering this action on the `pull_request` or `pull_request_target` events."
            );
            return Ok(None);
        };

        // Skip the API entirely for pull requests from anyone else
        if pr.user.login != DEPENDABOT_LOGIN {
            log::debug!("PR author '{}' is not Dependabot.", pr.user.login);
            return Ok(None);
        }

        log::debug!("Verifying the Pull Request contents are from Dependabot");
        let commits: Vec<PullRequestCommit> =
            self.client.get_json(&self.commits_path(pr.number)).await?;

        let Some(first) = commits.into_iter().next() else {
            log::warn!("Pull request #{} has no commits, nothing to verify.", pr.number);
            return Ok(None);
        };

        if first.author.as_ref().map(|a| a.login.as_str()) != Some(DEPENDABOT_LOGIN) {
            log::warn!("It looks like this PR was not created by Dependabot, refusing to proceed.");
            return Ok(None);
        }

        if !first.commit.verification.is_some_and(|v| v.verified) {
            log::warn!("Dependabot's commit signature is not verified, refusing to proceed.");
            return Ok(None);
        }

        Ok(Some(first.commit.message))
    }
}

#[async_trait]
impl MessageSource for VerifiedCommits {
    async fn fetch_message(&self) -> Result<Option<String>, FetchError> {
        let payload = EventPayload::from_file(&self.event_path)?;
        self.message_for(&payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> VerifiedCommits {
        VerifiedCommits::new(
            GithubClient::new("token").unwrap(),
            "dependabot/dependabot".parse().unwrap(),
            "/nonexistent/event.json",
        )
    }

    #[test]
    fn test_commits_path() {
        assert_eq!(
            source().commits_path(101),
            "repos/dependabot/dependabot/pulls/101/commits"
        );
    }

    #[tokio::test]
    async fn test_no_pull_request_in_payload() {
        let payload = EventPayload::from_json(r#"{"ref":"refs/heads/main"}"#).unwrap();
        assert_eq!(source().message_for(&payload).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_pull_request_from_other_author() {
        let payload = EventPayload::from_json(
            r#"{"pull_request":{"number":101,"user":{"login":"octocat"}}}"#,
        )
        .unwrap();
        assert_eq!(source().message_for(&payload).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_event_file_is_generic_error() {
        let err = source().fetch_message().await.unwrap_err();
        assert!(matches!(err, FetchError::Generic { .. }));
    }

    #[test]
    fn test_commit_listing_deserialize() {
        let commits: Vec<PullRequestCommit> = serde_json::from_str(
            r#"[{"commit":{"message":"Bump","verification":{"verified":true,"reason":"valid"}},"author":null}]"#,
        )
        .unwrap();
        assert_eq!(commits[0].commit.message, "Bump");
        assert!(commits[0].author.is_none());
        assert!(commits[0].commit.verification.as_ref().unwrap().verified);
    }
}
