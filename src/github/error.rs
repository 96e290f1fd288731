//! Error types exposed by the pull request sync layer.

use std::fmt;

use thiserror::Error;

/// Classification of a failed hosting-service call.
///
/// The sync core treats every upstream failure alike; the kind is only
/// recorded on the log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamKind {
    /// GitHub rejected the credential (401/403).
    Authentication,
    /// GitHub reported an exhausted rate limit.
    RateLimited,
    /// The request never produced an HTTP response.
    Network,
    /// Any other API failure, including validation errors and malformed
    /// responses.
    Api,
}

impl UpstreamKind {
    /// Short label used as a log field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::RateLimited => "rate_limited",
            Self::Network => "network",
            Self::Api => "api",
        }
    }
}

impl fmt::Display for UpstreamKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Errors surfaced while reading inputs or communicating with GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncError {
    /// A required input is missing or malformed.
    #[error("{message}")]
    Configuration {
        /// Which input is wrong and how.
        message: String,
    },

    /// A GitHub API call failed.
    #[error("{message}")]
    Upstream {
        /// Coarse classification of the failure.
        kind: UpstreamKind,
        /// Operation and response detail.
        message: String,
    },

    /// Writing workflow output failed.
    #[error("{message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl SyncError {
    /// Builds a configuration error from any displayable message.
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Builds the error reported when a required input is absent.
    pub(crate) fn missing_input(name: &str) -> Self {
        Self::configuration(format!("input required and not supplied: {name}"))
    }

    /// Label naming the failure class, for log events.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "configuration",
            Self::Upstream { kind, .. } => kind.as_str(),
            Self::Io { .. } => "io",
        }
    }

    /// Returns true for configuration failures.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Returns true for hosting-service failures.
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}
