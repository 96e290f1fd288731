//! `pr-sync` entrypoint: opens a pull request between two branches unless one
//! is already open.

use std::io;
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use pr_sync::{RunnerWorkflowSink, SyncConfig, SyncError, step};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let sink = RunnerWorkflowSink::from_env();
    match run(&sink).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            step::report_failure(&error, &sink);
            ExitCode::FAILURE
        }
    }
}

async fn run(sink: &RunnerWorkflowSink) -> Result<(), SyncError> {
    let config = load_config()?;
    step::run(&config, sink).await?;
    Ok(())
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`SyncError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<SyncConfig, SyncError> {
    SyncConfig::load().map_err(|error| SyncError::Configuration {
        message: error.to_string(),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
