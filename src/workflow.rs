//! Workflow runner reporting.
//!
//! The step talks to the runner that invoked it through workflow commands
//! written to stdout (`::warning::`, `::error::`) and through the step output
//! file named by `GITHUB_OUTPUT`.

use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::github::error::SyncError;
use crate::github::models::PullRequestSummary;

/// A structured event reported to the workflow runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    /// Non-fatal notice shown on the run summary.
    Warning {
        /// Human-readable warning text.
        message: String,
    },
    /// Terminal failure of the step.
    Failure {
        /// Underlying error message.
        message: String,
    },
    /// Named step output for later steps to consume.
    Output {
        /// Output name.
        name: String,
        /// Output value.
        value: String,
    },
}

impl WorkflowEvent {
    /// Builds the outputs published after a pull request is created.
    #[must_use]
    pub fn created_outputs(pull_request: &PullRequestSummary) -> Vec<Self> {
        let mut outputs = vec![
            Self::Output {
                name: "pull-request-id".to_owned(),
                value: pull_request.id.to_string(),
            },
            Self::Output {
                name: "pull-request-number".to_owned(),
                value: pull_request.number.to_string(),
            },
        ];
        if let Some(url) = pull_request
            .html_url
            .as_deref()
            .or(pull_request.url.as_deref())
        {
            outputs.push(Self::Output {
                name: "pull-request-url".to_owned(),
                value: url.to_owned(),
            });
        }
        outputs
    }
}

/// A sink that can record workflow events.
pub trait WorkflowSink: Send + Sync {
    /// Records a workflow event.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Io`] when the event cannot be written.
    fn record(&self, event: WorkflowEvent) -> Result<(), SyncError>;
}

/// Escapes a message for use as workflow command data.
#[must_use]
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escapes a workflow command property value.
#[must_use]
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// Renders an event as a workflow command line.
#[must_use]
pub fn command_line(event: &WorkflowEvent) -> String {
    match event {
        WorkflowEvent::Warning { message } => format!("::warning::{}", escape_data(message)),
        WorkflowEvent::Failure { message } => format!("::error::{}", escape_data(message)),
        WorkflowEvent::Output { name, value } => format!(
            "::set-output name={}::{}",
            escape_property(name),
            escape_data(value)
        ),
    }
}

/// Renders an output as an entry of the `GITHUB_OUTPUT` file.
///
/// Single-line values use `name=value`; multi-line values use a heredoc block
/// whose delimiter does not occur in the value.
#[must_use]
pub fn output_file_entry(name: &str, value: &str) -> String {
    if !value.contains('\n') && !value.contains('\r') {
        return format!("{name}={value}\n");
    }

    let mut delimiter = String::from("ghadelimiter");
    while value.contains(&delimiter) || name.contains(&delimiter) {
        delimiter.push('_');
    }
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

fn io_error(context: &str, error: &io::Error) -> SyncError {
    SyncError::Io {
        message: format!("{context}: {error}"),
    }
}

fn append_output(path: &Path, name: &str, value: &str) -> Result<(), SyncError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| io_error("open GITHUB_OUTPUT", &error))?;
    file.write_all(output_file_entry(name, value).as_bytes())
        .map_err(|error| io_error("write GITHUB_OUTPUT", &error))?;
    tracing::debug!(name, file = %path.display(), "wrote step output");
    Ok(())
}

/// Writes events as workflow commands to stdout and outputs to the
/// `GITHUB_OUTPUT` file.
#[derive(Debug, Default, Clone)]
pub struct RunnerWorkflowSink {
    output_file: Option<PathBuf>,
}

impl RunnerWorkflowSink {
    /// Creates a sink that appends outputs to `output_file`, or falls back to
    /// `::set-output` commands when no file is given.
    #[must_use]
    pub const fn new(output_file: Option<PathBuf>) -> Self {
        Self { output_file }
    }

    /// Creates a sink using the `GITHUB_OUTPUT` variable of the runner.
    #[must_use]
    pub fn from_env() -> Self {
        let output_file = env::var_os("GITHUB_OUTPUT")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self::new(output_file)
    }
}

impl WorkflowSink for RunnerWorkflowSink {
    fn record(&self, event: WorkflowEvent) -> Result<(), SyncError> {
        if let (WorkflowEvent::Output { name, value }, Some(path)) = (&event, &self.output_file) {
            return append_output(path, name, value);
        }

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", command_line(&event))
            .map_err(|error| io_error("write workflow command", &error))
    }
}
