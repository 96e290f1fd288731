//! Keeps exactly one open pull request between two branches of a GitHub
//! repository.
//!
//! The library lists open pull requests for a head/base pair through
//! Octocrab, creates one when none matches, and reports the result to the
//! workflow runner that invoked it.

pub mod config;
pub mod github;
pub mod step;
pub mod workflow;

pub use config::SyncConfig;
pub use github::{
    NewPullRequest, OctocrabGateway, PersonalAccessToken, PullRequestGateway, PullRequestRequest,
    PullRequestSummary, PullRequestSync, RepositoryLocator, SyncError, SyncOutcome, UpstreamKind,
    has_open_matching_pull_request,
};
pub use workflow::{RunnerWorkflowSink, WorkflowEvent, WorkflowSink};
