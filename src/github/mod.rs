//! GitHub pull request sync and credential handling.
//!
//! This module wraps Octocrab to list and create pull requests, validates
//! repository identity and tokens, and maps failures into the two error
//! kinds the CLI reports: configuration and upstream.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod sync;

pub use error::{SyncError, UpstreamKind};
pub use gateway::{OctocrabGateway, PullRequestGateway};
pub use locator::{PersonalAccessToken, RepositoryLocator, RepositoryName, RepositoryOwner};
pub use models::{NewPullRequest, PullRequestSummary};
pub use sync::{PullRequestRequest, PullRequestSync, SyncOutcome, has_open_matching_pull_request};

#[cfg(test)]
pub use gateway::MockPullRequestGateway;
