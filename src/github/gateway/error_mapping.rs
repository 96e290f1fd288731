//! Maps Octocrab failures onto [`SyncError::Upstream`].

use http::StatusCode;

use crate::github::error::{SyncError, UpstreamKind};

/// Checks if a GitHub error status indicates an authentication failure.
const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Checks whether the GitHub error represents a rate limit error based on the
/// HTTP status and message / documentation URL content.
fn is_rate_limit_error(source: &octocrab::GitHubError) -> bool {
    let is_rate_limit_status = matches!(
        source.status_code,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let message_indicates_rate_limit = source.message.to_lowercase().contains("rate limit")
        || source
            .documentation_url
            .as_deref()
            .is_some_and(|url| url.contains("rate-limit"));

    is_rate_limit_status && message_indicates_rate_limit
}

/// Classifies a GitHub API error response.
fn classify_github_error(source: &octocrab::GitHubError) -> UpstreamKind {
    if is_rate_limit_error(source) {
        UpstreamKind::RateLimited
    } else if is_auth_failure(source.status_code) {
        UpstreamKind::Authentication
    } else {
        UpstreamKind::Api
    }
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> SyncError {
    if let octocrab::Error::GitHub { source, .. } = error {
        let detail = source
            .errors
            .as_ref()
            .filter(|errors| !errors.is_empty())
            .map(|errors| {
                let rendered: Vec<String> = errors.iter().map(ToString::to_string).collect();
                format!(" ({})", rendered.join(", "))
            })
            .unwrap_or_default();

        return SyncError::Upstream {
            kind: classify_github_error(source),
            message: format!(
                "{operation} failed with status {status}: {message}{detail}",
                status = source.status_code,
                message = source.message
            ),
        };
    }

    let kind = if is_network_error(error) {
        UpstreamKind::Network
    } else {
        UpstreamKind::Api
    };

    SyncError::Upstream {
        kind,
        message: format!("{operation} failed: {error}"),
    }
}
