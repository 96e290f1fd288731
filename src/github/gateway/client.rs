//! Octocrab client construction.

use http::Uri;
use octocrab::Octocrab;

use crate::github::error::SyncError;
use crate::github::locator::PersonalAccessToken;

use super::error_mapping::map_octocrab_error;

/// Builds an Octocrab client for the given token and API base URL.
///
/// # Errors
///
/// Returns `SyncError::Configuration` when the base URI cannot be parsed or
/// `SyncError::Upstream` when Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &str,
) -> Result<Octocrab, SyncError> {
    let base_uri: Uri = api_base.parse::<Uri>().map_err(|error| {
        SyncError::configuration(format!("API URL `{api_base}` is invalid: {error}"))
    })?;

    Octocrab::builder()
        .personal_token(token.as_ref())
        .base_uri(base_uri)
        .map_err(|error| map_octocrab_error("build client", &error))?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}
