//! End-to-end tests for the fetch-metadata binary
//!
//! These tests verify:
//! - Outputs are appended to the GITHUB_OUTPUT file
//! - Informational runs exit successfully without outputs
//! - Configuration failures are reported as workflow errors

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const MESSAGE: &str = "Bumps [coffee-rails](https://github.com/rails/coffee-rails) from 4.0.1 to 4.2.2.

---
updated-dependencies:
- dependency-name: coffee-rails
  dependency-type: direct:production
  update-type: version-update:semver-minor
- dependency-name: coffeescript
  dependency-type: indirect
  update-type: version-update:semver-major
...

Signed-off-by: dependabot[bot] <support@github.com>";

/// Command with the runner environment cleared
fn command() -> Command {
    let mut cmd = Command::cargo_bin("fetch-metadata").unwrap();
    for var in [
        "INPUT_GITHUB-TOKEN",
        "GITHUB_TOKEN",
        "GITHUB_REPOSITORY",
        "GITHUB_EVENT_PATH",
        "GITHUB_API_URL",
        "GITHUB_OUTPUT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn write_message(dir: &TempDir, message: &str) -> std::path::PathBuf {
    let path = dir.path().join("message.txt");
    fs::write(&path, message).unwrap();
    path
}

#[test]
fn test_outputs_written_to_github_output() {
    let dir = tempfile::tempdir().unwrap();
    let message = write_message(&dir, MESSAGE);
    let output_file = dir.path().join("github_output");

    command()
        .arg("--commit-message-file")
        .arg(&message)
        .env("GITHUB_OUTPUT", &output_file)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "::group::Outputting metadata for 2 updated dependencies",
        ));

    let outputs = fs::read_to_string(&output_file).unwrap();
    assert!(outputs.contains("dependency-names=coffee-rails, coffeescript\n"));
    assert!(outputs.contains("dependency-type=indirect\n"));
    assert!(outputs.contains("update-type=version-update:semver-major\n"));
    assert!(outputs.contains(
        r#"updated-dependencies-json=[{"dependencyName":"coffee-rails","dependencyType":"direct:production","updateType":"version-update:semver-minor"},{"dependencyName":"coffeescript","dependencyType":"indirect","updateType":"version-update:semver-major"}]"#
    ));
}

#[test]
fn test_message_from_stdin() {
    command()
        .args(["--commit-message-file", "-"])
        .write_stdin(MESSAGE)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "dependency-names=coffee-rails, coffeescript",
        ));
}

#[test]
fn test_no_metadata_exits_successfully() {
    let dir = tempfile::tempdir().unwrap();
    let message = write_message(&dir, "Just a commit message, nothing to see here.");
    let output_file = dir.path().join("github_output");

    command()
        .arg("--commit-message-file")
        .arg(&message)
        .env("GITHUB_OUTPUT", &output_file)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "PR does not contain metadata, nothing to do.",
        ));

    assert!(!output_file.exists());
}

#[test]
fn test_json_report_is_whole_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let message = write_message(&dir, MESSAGE);
    let output_file = dir.path().join("github_output");

    let assert = command()
        .arg("--commit-message-file")
        .arg(&message)
        .arg("--json")
        .env("GITHUB_OUTPUT", &output_file)
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "::group::Outputting metadata for 2 updated dependencies",
        ));

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["status"], "published");
    assert_eq!(report["dependency-names"], "coffee-rails, coffeescript");
    assert_eq!(report["dependency-type"], "indirect");
    assert_eq!(report["update-type"], "version-update:semver-major");

    let outputs = fs::read_to_string(&output_file).unwrap();
    assert!(outputs.contains("dependency-type=indirect\n"));
}

#[test]
fn test_json_report_for_configuration_failure() {
    let assert = command().arg("--json").assert().failure();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["status"], "failed");
    assert!(report["error"]
        .as_str()
        .unwrap()
        .starts_with("github-token is not set!"));
}

#[test]
fn test_missing_token_fails() {
    command()
        .assert()
        .failure()
        .stdout(predicate::str::contains("::error::github-token is not set!"));
}

#[test]
fn test_missing_message_file_fails() {
    command()
        .args(["--commit-message-file", "/nonexistent/message.txt"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "::error::failed to read commit message",
        ));
}
