//! Ensures a single open pull request exists between two branches.

use std::fmt;

use super::error::SyncError;
use super::gateway::PullRequestGateway;
use super::locator::RepositoryLocator;
use super::models::{NewPullRequest, PullRequestSummary};

/// Returns true when any pull request goes from `head` into `base`.
///
/// Refs are compared exactly, without case folding or prefix matching.
#[must_use]
pub fn has_open_matching_pull_request(
    open_pull_requests: &[PullRequestSummary],
    head: &str,
    base: &str,
) -> bool {
    open_pull_requests
        .iter()
        .any(|pull_request| pull_request.connects(head, base))
}

/// Inputs for a single sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRequest {
    /// Head branch holding the changes.
    pub source_branch: String,
    /// Base branch the changes merge into.
    pub target_branch: String,
    /// Title for a newly created pull request.
    pub title: String,
    /// Body for a newly created pull request.
    pub body: String,
    /// Repository the pull request belongs to.
    pub repository: RepositoryLocator,
}

impl PullRequestRequest {
    /// Checks that every text input carries a non-blank value.
    ///
    /// Inputs are checked in the order `from`, `to`, `title`, `body`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Configuration`] naming the first missing input.
    pub fn validate(&self) -> Result<(), SyncError> {
        let inputs = [
            ("from", &self.source_branch),
            ("to", &self.target_branch),
            ("title", &self.title),
            ("body", &self.body),
        ];

        inputs
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map_or(Ok(()), |(name, _)| Err(SyncError::missing_input(name)))
    }

    fn new_pull_request(&self) -> NewPullRequest {
        NewPullRequest {
            head: self.source_branch.clone(),
            base: self.target_branch.clone(),
            title: self.title.clone(),
            body: self.body.clone(),
        }
    }
}

/// Result of a successful sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A new pull request was opened.
    Created(PullRequestSummary),
    /// A matching pull request was already open; nothing was created.
    Skipped {
        /// Head branch of the existing pull request.
        head: String,
        /// Base branch of the existing pull request.
        base: String,
    },
}

impl SyncOutcome {
    /// Warning text for the skip path, `None` when a pull request was created.
    #[must_use]
    pub fn skip_warning(&self) -> Option<String> {
        match self {
            Self::Created(_) => None,
            Self::Skipped { .. } => Some(self.to_string()),
        }
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created(pull_request) => write!(
                formatter,
                "Created pull request #{} from {} to {}",
                pull_request.number, pull_request.head_ref, pull_request.base_ref
            ),
            Self::Skipped { head, base } => write!(
                formatter,
                "A pull request already exists from {head} to {base}. Pull request creation skipped."
            ),
        }
    }
}

/// Checks for an open pull request and creates one when missing.
pub struct PullRequestSync<'client, Gateway>
where
    Gateway: PullRequestGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> PullRequestSync<'client, Gateway>
where
    Gateway: PullRequestGateway,
{
    /// Create a new sync facade using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Ensure an open pull request exists for the request's branch pair.
    ///
    /// The listing call always completes before any create call is issued.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Configuration`] before any network call when an
    /// input is blank, and propagates [`SyncError::Upstream`] from the
    /// gateway when listing or creating fails.
    pub async fn sync(&self, request: &PullRequestRequest) -> Result<SyncOutcome, SyncError> {
        request.validate()?;

        let head = request.source_branch.as_str();
        let base = request.target_branch.as_str();

        tracing::info!(repository = %request.repository, head, base, "checking for open pull request");
        let open_pull_requests = self
            .client
            .list_open_pull_requests(&request.repository, head, base)
            .await?;

        if has_open_matching_pull_request(&open_pull_requests, head, base) {
            let outcome = SyncOutcome::Skipped {
                head: head.to_owned(),
                base: base.to_owned(),
            };
            tracing::warn!("{outcome}");
            return Ok(outcome);
        }

        let created = self
            .client
            .create_pull_request(&request.repository, &request.new_pull_request())
            .await?;

        tracing::info!(
            number = created.number,
            url = created.html_url.as_deref().unwrap_or_default(),
            "created pull request"
        );
        Ok(SyncOutcome::Created(created))
    }
}
