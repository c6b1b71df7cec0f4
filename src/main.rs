//! fetch-metadata - Dependabot metadata extraction for GitHub Actions
//!
//! Reads the verified commit message of a Dependabot pull request and
//! publishes the updated dependencies as step outputs:
//! - updated-dependencies-json
//! - dependency-names
//! - dependency-type
//! - update-type

use clap::Parser;
use fetch_metadata::cli::CliArgs;
use fetch_metadata::error::AppError;
use fetch_metadata::github::{GithubClient, MessageSource, StaticMessage, VerifiedCommits};
use fetch_metadata::orchestrator::{Orchestrator, RunOutcome};
use fetch_metadata::output::{ActionsOutput, JsonReport, OutputSink};
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logger(args.log_level(), args.json);

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Install a logger rendering records as workflow commands
///
/// With `--json`, stdout carries only the report, so logs go to stderr.
fn init_logger(level: log::LevelFilter, json: bool) {
    let target = if json {
        env_logger::Target::Stderr
    } else {
        env_logger::Target::Stdout
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(target)
        .format(|buf, record| match record.level() {
            log::Level::Error => writeln!(buf, "::error::{}", record.args()),
            log::Level::Warn => writeln!(buf, "::warning::{}", record.args()),
            log::Level::Info => writeln!(buf, "{}", record.args()),
            log::Level::Debug | log::Level::Trace => writeln!(buf, "::debug::{}", record.args()),
        })
        .init();
}

/// Build the message source from the CLI configuration
fn build_source(args: &CliArgs) -> Result<Box<dyn MessageSource>, AppError> {
    if let Some(path) = &args.commit_message_file {
        return Ok(Box::new(StaticMessage::from_file(path)?));
    }

    let token = args.token()?;
    let repository = args.repository()?;
    let event_path = args.event_path()?;
    let client = GithubClient::with_api_url(&args.api_url, token)?;

    Ok(Box::new(VerifiedCommits::new(client, repository, event_path)))
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let log_stream: Box<dyn Write> = if args.json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };
    let mut sink = ActionsOutput::new(log_stream, args.output_file.clone());

    let outcome = match build_source(&args) {
        Ok(source) => Orchestrator::new(source).run(&mut sink).await,
        Err(e) => {
            let report = e.to_string();
            sink.set_failed(&report)?;
            RunOutcome::Failed(report)
        }
    };

    if args.json {
        let mut stdout = io::stdout().lock();
        JsonReport::from_outcome(&outcome).write(&mut stdout)?;
        stdout.flush()?;
    }

    if outcome.is_failure() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
