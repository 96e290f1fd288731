//! Data models for pull requests returned by and sent to the GitHub API.
//!
//! Types prefixed with `Api` are internal deserialisation targets that convert
//! into public domain types.

use serde::{Deserialize, Serialize};

/// Pull request summary as seen by the sync core.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestSummary {
    /// Global pull request identifier.
    pub id: u64,
    /// Repository-scoped pull request number.
    pub number: u64,
    /// Head (source) branch name.
    pub head_ref: String,
    /// Base (target) branch name.
    pub base_ref: String,
    /// API URL of the pull request.
    pub url: Option<String>,
    /// HTML URL for displaying to a user.
    pub html_url: Option<String>,
}

impl PullRequestSummary {
    /// Returns true when the pull request goes from `head` into `base`.
    ///
    /// Both refs are compared verbatim.
    #[must_use]
    pub fn connects(&self, head: &str, base: &str) -> bool {
        self.head_ref == head && self.base_ref == base
    }
}

/// Payload for creating a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPullRequest {
    /// Head (source) branch.
    pub head: String,
    /// Base (target) branch.
    pub base: String,
    /// Pull request title.
    pub title: String,
    /// Pull request body.
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequest {
    pub(super) id: u64,
    pub(super) number: u64,
    pub(super) head: ApiBranchRef,
    pub(super) base: ApiBranchRef,
    pub(super) url: Option<String>,
    pub(super) html_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiBranchRef {
    #[serde(rename = "ref")]
    pub(super) branch: String,
}

impl From<ApiPullRequest> for PullRequestSummary {
    fn from(value: ApiPullRequest) -> Self {
        Self {
            id: value.id,
            number: value.number,
            head_ref: value.head.branch,
            base_ref: value.base.branch,
            url: value.url,
            html_url: value.html_url,
        }
    }
}
