//! One run of the sync step: resolve inputs, sync, report to the runner.

use crate::config::SyncConfig;
use crate::github::error::SyncError;
use crate::github::gateway::OctocrabGateway;
use crate::github::sync::{PullRequestSync, SyncOutcome};
use crate::workflow::{WorkflowEvent, WorkflowSink};

/// Runs the step against GitHub using the resolved configuration.
///
/// Once the sync has succeeded the step succeeds. A failure to publish the
/// outcome is logged and reported as a workflow warning.
///
/// # Errors
///
/// Returns [`SyncError::Configuration`] when inputs, token or repository are
/// missing, and [`SyncError::Upstream`] when GitHub calls fail.
pub async fn run(config: &SyncConfig, sink: &dyn WorkflowSink) -> Result<SyncOutcome, SyncError> {
    let request = config.pull_request_request()?;
    request.validate()?;

    let token = config.resolve_token()?;
    let gateway = OctocrabGateway::for_token(&token, &request.repository)?;

    let outcome = PullRequestSync::new(&gateway).sync(&request).await?;
    if let Err(error) = report(&outcome, sink) {
        tracing::warn!(%error, "failed to publish step outcome");
        let warning = WorkflowEvent::Warning {
            message: format!("{outcome}, but publishing the result failed: {error}"),
        };
        if let Err(warning_error) = sink.record(warning) {
            tracing::warn!(error = %warning_error, "failed to report publishing warning");
        }
    }
    Ok(outcome)
}

/// Publishes the outcome as workflow events.
///
/// # Errors
///
/// Returns [`SyncError::Io`] when the sink cannot write an event.
pub fn report(outcome: &SyncOutcome, sink: &dyn WorkflowSink) -> Result<(), SyncError> {
    match outcome {
        SyncOutcome::Created(pull_request) => WorkflowEvent::created_outputs(pull_request)
            .into_iter()
            .try_for_each(|event| sink.record(event)),
        SyncOutcome::Skipped { .. } => outcome
            .skip_warning()
            .map_or(Ok(()), |message| sink.record(WorkflowEvent::Warning { message })),
    }
}

/// Logs a terminal failure and reports it to the runner as `::error::`.
///
/// A sink that cannot take the failure is logged too; the step fails either
/// way.
pub fn report_failure(error: &SyncError, sink: &dyn WorkflowSink) {
    tracing::error!(category = error.category(), "{error}");
    let failure = WorkflowEvent::Failure {
        message: error.to_string(),
    };
    if let Err(report_error) = sink.record(failure) {
        tracing::error!("{report_error}");
    }
}
