//! Gateways for reaching the GitHub pull request API through Octocrab.
//!
//! The trait keeps the sync core independent of HTTP so tests can drive it
//! with a mock, while [`OctocrabGateway`] performs the real requests.

mod client;
mod error_mapping;
mod pull_request;

pub use pull_request::OctocrabGateway;

use async_trait::async_trait;

use crate::github::error::SyncError;
use crate::github::locator::RepositoryLocator;
use crate::github::models::{NewPullRequest, PullRequestSummary};

/// Gateway that can list and create pull requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// List open pull requests filtered server-side by head and base branch.
    async fn list_open_pull_requests(
        &self,
        repository: &RepositoryLocator,
        head: &str,
        base: &str,
    ) -> Result<Vec<PullRequestSummary>, SyncError>;

    /// Open a new pull request.
    async fn create_pull_request(
        &self,
        repository: &RepositoryLocator,
        pull_request: &NewPullRequest,
    ) -> Result<PullRequestSummary, SyncError>;
}
