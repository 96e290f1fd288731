//! Step configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach and then completed
//! from the variables a workflow runner exports for every step.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – none of the inputs has a default
//! 2. **Configuration file** – `.pr-sync.toml` in the current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `PR_SYNC_FROM`, `PR_SYNC_TOKEN`, ...
//! 4. **Command-line arguments** – `--from`, `--to`, `--title`, `--body`, ...
//!
//! When a value is still missing after merging, the runner variables are
//! consulted: `INPUT_<NAME>` for the four pull request inputs,
//! `GITHUB_TOKEN`, `GITHUB_REPOSITORY` and `GITHUB_API_URL`.
//!
//! # Configuration File
//!
//! ```toml
//! from = "dev"
//! to = "main"
//! title = "Release"
//! body = "Merge dev into main"
//! repository = "octocat/hello-world"
//! ```

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::error::SyncError;
use crate::github::locator::{DEFAULT_API_BASE, PersonalAccessToken, RepositoryLocator};
use crate::github::sync::PullRequestRequest;

/// Step configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use pr_sync::SyncConfig;
///
/// let config = SyncConfig::load().expect("failed to load configuration");
/// let request = config.pull_request_request().expect("repository required");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PR_SYNC",
    discovery(
        dotfile_name = ".pr-sync.toml",
        config_file_name = "pr-sync.toml",
        app_name = "pr-sync"
    )
)]
pub struct SyncConfig {
    /// Head branch holding the changes.
    ///
    /// Can be provided via:
    /// - CLI: `--from <BRANCH>`
    /// - Environment: `PR_SYNC_FROM` or `INPUT_FROM`
    /// - Config file: `from = "..."`
    #[ortho_config()]
    pub from: Option<String>,

    /// Base branch the changes merge into.
    ///
    /// Can be provided via:
    /// - CLI: `--to <BRANCH>`
    /// - Environment: `PR_SYNC_TO` or `INPUT_TO`
    /// - Config file: `to = "..."`
    #[ortho_config()]
    pub to: Option<String>,

    /// Title used when a pull request is created.
    #[ortho_config()]
    pub title: Option<String>,

    /// Body used when a pull request is created.
    #[ortho_config()]
    pub body: Option<String>,

    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>`
    /// - Environment: `PR_SYNC_TOKEN` or `GITHUB_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config()]
    pub token: Option<String>,

    /// Target repository as `owner/name`.
    ///
    /// Can be provided via:
    /// - CLI: `--repository <OWNER/NAME>`
    /// - Environment: `PR_SYNC_REPOSITORY` or `GITHUB_REPOSITORY`
    /// - Config file: `repository = "..."`
    #[ortho_config()]
    pub repository: Option<String>,

    /// GitHub API base URL, for GitHub Enterprise installations.
    ///
    /// Falls back to `GITHUB_API_URL`, then to `https://api.github.com`.
    #[ortho_config()]
    pub api_url: Option<String>,
}

/// Reads a workflow input the way runners expose it: `INPUT_<NAME>` with the
/// name upper-cased and spaces replaced by underscores, trimmed.
#[must_use]
pub fn workflow_input(name: &str) -> Option<String> {
    let variable = format!("INPUT_{}", name.replace(' ', "_").to_uppercase());
    env::var(variable)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

impl SyncConfig {
    /// Returns a pull request input, falling back to the workflow input of the
    /// same name. Missing inputs resolve to an empty string so validation can
    /// report them by name.
    #[must_use]
    pub fn resolve_input(&self, name: &str) -> String {
        let configured = match name {
            "from" => self.from.as_ref(),
            "to" => self.to.as_ref(),
            "title" => self.title.as_ref(),
            "body" => self.body.as_ref(),
            _ => None,
        };

        non_blank(configured)
            .or_else(|| workflow_input(name))
            .unwrap_or_default()
    }

    /// Resolves the token from configuration or `GITHUB_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Configuration`] when no source provides a
    /// non-blank token.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, SyncError> {
        let value = non_blank(self.token.as_ref())
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or_else(|| {
                SyncError::configuration("GitHub token is required (set GITHUB_TOKEN or --token)")
            })?;
        PersonalAccessToken::new(value)
    }

    /// Resolves the API base URL.
    #[must_use]
    pub fn resolve_api_url(&self) -> String {
        non_blank(self.api_url.as_ref())
            .or_else(|| non_blank(env::var("GITHUB_API_URL").ok().as_ref()))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_owned())
    }

    /// Resolves the target repository from configuration or
    /// `GITHUB_REPOSITORY`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Configuration`] when the repository is missing or
    /// not in `owner/name` form, or when the API URL is invalid.
    pub fn repository_locator(&self) -> Result<RepositoryLocator, SyncError> {
        let slug = non_blank(self.repository.as_ref())
            .or_else(|| non_blank(env::var("GITHUB_REPOSITORY").ok().as_ref()))
            .ok_or_else(|| {
                SyncError::configuration(
                    "repository is required (set GITHUB_REPOSITORY or --repository)",
                )
            })?;

        RepositoryLocator::from_slug(&self.resolve_api_url(), &slug)
    }

    /// Assembles the sync request from the resolved inputs.
    ///
    /// Blank inputs are left for [`PullRequestRequest::validate`] to report.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Configuration`] when the repository cannot be
    /// resolved.
    pub fn pull_request_request(&self) -> Result<PullRequestRequest, SyncError> {
        Ok(PullRequestRequest {
            source_branch: self.resolve_input("from"),
            target_branch: self.resolve_input("to"),
            title: self.resolve_input("title"),
            body: self.resolve_input("body"),
            repository: self.repository_locator()?,
        })
    }
}

#[cfg(test)]
mod tests;
