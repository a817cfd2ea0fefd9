use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod check;
mod cli;
mod model;
mod redfish;

use check::Outcome;
use cli::{Cli, Mode, Options};
use model::Severity;
use redfish::{RedfishError, Session};

#[tokio::main]
async fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout carries only the check result the
    // monitoring system parses.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = match Cli::parse().validate() {
        Ok(options) => options,
        Err(message) => {
            println!("UNKNOWN: {message}");
            return ExitCode::from(Severity::Unknown.exit_code());
        }
    };

    match probe(&options).await {
        Ok(outcome) => {
            println!("{}", outcome.render(&options.hostname));
            ExitCode::from(outcome.exit_code())
        }
        Err(error) => {
            let severity = failure_severity(&error, options.mode);
            println!("{}", failure_message(&error, severity, &options.hostname));
            ExitCode::from(severity.exit_code())
        }
    }
}

/// Connect, run the selected mode, and always release the session.
async fn probe(options: &Options) -> Result<Outcome, RedfishError> {
    let dump_to = options
        .dumpresponse
        .then(|| PathBuf::from(format!("{}_response.json", options.mode.name())));

    let session = Session::connect(
        &options.hostname,
        &options.user,
        &options.password,
        options.timeout,
        dump_to,
    )
    .await?;

    // Bind the fallible body first: logout runs on success and failure
    // alike, before the outcome propagates.
    let outcome = check::run_mode(&session, options.mode).await;
    session.logout().await;
    outcome
}

/// Transport failures are UNKNOWN for every mode; any other failure is
/// UNKNOWN too, except in version mode where an unreadable manager is a
/// hard CRITICAL.
fn failure_severity(error: &RedfishError, mode: Mode) -> Severity {
    if error.is_transport() {
        Severity::Unknown
    } else if mode == Mode::Version {
        Severity::Critical
    } else {
        Severity::Unknown
    }
}

fn failure_message(error: &RedfishError, severity: Severity, hostname: &str) -> String {
    if error.is_transport() {
        format!(
            "CRITICAL: iDRAC not reachable. / iDRAC: {} / Type: {} / Message: {}",
            hostname,
            error.kind(),
            error
        )
    } else {
        format!(
            "{}: An error occurred. / iDRAC: {} / Type: {} / Message: {}",
            severity.label(),
            hostname,
            error.kind(),
            error
        )
    }
}
