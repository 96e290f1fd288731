//! Repository identity and credential wrappers.

use std::fmt;

use url::Url;

use super::error::SyncError;

/// Public GitHub API base used when no other base is configured.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, SyncError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SyncError::configuration("repository owner must not be empty"));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, SyncError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SyncError::configuration("repository name must not be empty"));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Personal access token wrapper enforcing presence.
///
/// The `Debug` implementation redacts the value so the token cannot leak
/// through logging.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Configuration`] when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, SyncError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SyncError::configuration("GitHub token is required"));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl fmt::Debug for PersonalAccessToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("PersonalAccessToken(<redacted>)")
    }
}

/// Repository targeted by the sync, with the API base used to reach it.
///
/// # Example
///
/// ```
/// use pr_sync::RepositoryLocator;
///
/// let locator = RepositoryLocator::from_slug("https://api.github.com", "octo/repo")
///     .expect("should parse repository slug");
/// assert_eq!(locator.owner().as_str(), "octo");
/// assert_eq!(locator.repository().as_str(), "repo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a locator for a `github.com` repository.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Configuration`] when owner or repo is empty.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, SyncError> {
        Self::new(DEFAULT_API_BASE, owner, repo)
    }

    /// Creates a locator from an explicit API base, owner and repository.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Configuration`] when the API base is not a valid
    /// URL or when owner or repo is empty.
    pub fn new(api_base: &str, owner: &str, repo: &str) -> Result<Self, SyncError> {
        let parsed_base = Url::parse(api_base.trim()).map_err(|error| {
            SyncError::configuration(format!("API URL `{api_base}` is invalid: {error}"))
        })?;
        let validated_owner = RepositoryOwner::new(owner)?;
        let repository = RepositoryName::new(repo)?;

        Ok(Self {
            api_base: parsed_base,
            owner: validated_owner,
            repository,
        })
    }

    /// Parses an `owner/name` slug such as the one workflow runners export.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Configuration`] when the slug does not have
    /// exactly two non-empty segments or the API base is invalid.
    pub fn from_slug(api_base: &str, slug: &str) -> Result<Self, SyncError> {
        let malformed = || {
            SyncError::configuration(format!(
                "repository `{slug}` must be in the form owner/name"
            ))
        };

        let (owner, repo) = slug.trim().split_once('/').ok_or_else(malformed)?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(malformed());
        }

        Self::new(api_base, owner, repo)
    }

    /// API base URL.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Returns the API path for listing and creating pull requests.
    pub(crate) fn pulls_path(&self) -> String {
        format!(
            "/repos/{}/{}/pulls",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }

    /// Qualifies a head branch as `owner:branch` for the listing filter.
    ///
    /// GitHub ignores an unqualified `head` filter, so bare branch names are
    /// prefixed with the repository owner. Already qualified heads pass
    /// through unchanged.
    pub(crate) fn qualified_head(&self, head: &str) -> String {
        if head.contains(':') {
            head.to_owned()
        } else {
            format!("{}:{head}", self.owner.as_str())
        }
    }
}

impl fmt::Display for RepositoryLocator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}/{}",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }
}
