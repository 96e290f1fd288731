//! Octocrab implementation of the pull request gateway.

use async_trait::async_trait;
use octocrab::{Octocrab, Page};

use crate::github::error::SyncError;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};
use crate::github::models::{ApiPullRequest, NewPullRequest, PullRequestSummary};

use super::PullRequestGateway;
use super::client::build_octocrab_client;
use super::error_mapping::map_octocrab_error;

/// Largest page GitHub serves; the listing never follows further pages.
const LIST_PAGE_SIZE: &str = "100";

/// Octocrab-backed gateway.
pub struct OctocrabGateway {
    client: Octocrab,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and repository.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Configuration` when the API base cannot be parsed
    /// or `SyncError::Upstream` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        repository: &RepositoryLocator,
    ) -> Result<Self, SyncError> {
        let octocrab = build_octocrab_client(token, repository.api_base().as_str())?;
        Ok(Self::new(octocrab))
    }
}

#[async_trait]
impl PullRequestGateway for OctocrabGateway {
    async fn list_open_pull_requests(
        &self,
        repository: &RepositoryLocator,
        head: &str,
        base: &str,
    ) -> Result<Vec<PullRequestSummary>, SyncError> {
        let qualified_head = repository.qualified_head(head);
        let query_params = [
            ("state", "open"),
            ("head", qualified_head.as_str()),
            ("base", base),
            ("per_page", LIST_PAGE_SIZE),
        ];

        tracing::debug!(%repository, head = %qualified_head, base, "listing open pull requests");

        let page: Page<ApiPullRequest> = self
            .client
            .get(repository.pulls_path(), Some(&query_params))
            .await
            .map_err(|error| map_octocrab_error("list pull requests", &error))?;

        Ok(page
            .items
            .into_iter()
            .map(ApiPullRequest::into)
            .collect())
    }

    async fn create_pull_request(
        &self,
        repository: &RepositoryLocator,
        pull_request: &NewPullRequest,
    ) -> Result<PullRequestSummary, SyncError> {
        tracing::debug!(
            %repository,
            head = %pull_request.head,
            base = %pull_request.base,
            "creating pull request"
        );

        self.client
            .post::<_, ApiPullRequest>(repository.pulls_path(), Some(pull_request))
            .await
            .map(ApiPullRequest::into)
            .map_err(|error| map_octocrab_error("create pull request", &error))
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use serde_json::json;
    use wiremock::matchers::{body_json, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::OctocrabGateway;
    use crate::github::error::{SyncError, UpstreamKind};
    use crate::github::gateway::PullRequestGateway;
    use crate::github::locator::{PersonalAccessToken, RepositoryLocator};
    use crate::github::models::NewPullRequest;

    const PULLS_PATH: &str = "/repos/octo/repo/pulls";

    fn pull_request_json(number: u64, head: &str, base: &str) -> serde_json::Value {
        json!({
            "id": 9000 + number,
            "number": number,
            "url": format!("https://api.github.com/repos/octo/repo/pulls/{number}"),
            "html_url": format!("https://github.com/octo/repo/pull/{number}"),
            "state": "open",
            "head": { "ref": head, "sha": "abc123" },
            "base": { "ref": base, "sha": "def456" }
        })
    }

    #[fixture]
    fn new_pull_request() -> NewPullRequest {
        NewPullRequest {
            head: "feature-x".to_owned(),
            base: "main".to_owned(),
            title: "Merge feature-x".to_owned(),
            body: "Automated pull request".to_owned(),
        }
    }

    fn gateway_for(server: &MockServer) -> (OctocrabGateway, RepositoryLocator) {
        let locator = RepositoryLocator::from_slug(&server.uri(), "octo/repo")
            .expect("should create repository locator");
        let token = PersonalAccessToken::new("valid-token").expect("token should be valid");
        let gateway = OctocrabGateway::for_token(&token, &locator).expect("should create gateway");
        (gateway, locator)
    }

    #[tokio::test]
    async fn list_sends_open_state_and_qualified_head_filter() {
        let server = MockServer::start().await;
        let (gateway, locator) = gateway_for(&server);

        Mock::given(method("GET"))
            .and(path(PULLS_PATH))
            .and(query_param("state", "open"))
            .and(query_param("head", "octo:feature-x"))
            .and(query_param("base", "main"))
            .and(query_param("per_page", "100"))
            .and(header_exists("authorization"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([pull_request_json(7, "feature-x", "main")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let pulls = gateway
            .list_open_pull_requests(&locator, "feature-x", "main")
            .await
            .expect("request should succeed");

        assert_eq!(pulls.len(), 1, "expected one pull request");
        let first = pulls.first().expect("should have first item");
        assert_eq!(first.number, 7);
        assert_eq!(first.id, 9007);
        assert_eq!(first.head_ref, "feature-x");
        assert_eq!(first.base_ref, "main");
        assert_eq!(
            first.html_url.as_deref(),
            Some("https://github.com/octo/repo/pull/7")
        );
    }

    #[tokio::test]
    async fn list_keeps_already_qualified_head() {
        let server = MockServer::start().await;
        let (gateway, locator) = gateway_for(&server);

        Mock::given(method("GET"))
            .and(path(PULLS_PATH))
            .and(query_param("head", "fork-owner:feature-x"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let pulls = gateway
            .list_open_pull_requests(&locator, "fork-owner:feature-x", "main")
            .await
            .expect("request should succeed");

        assert!(pulls.is_empty(), "expected no pull requests");
    }

    #[rstest]
    #[tokio::test]
    async fn create_posts_payload_and_returns_summary(new_pull_request: NewPullRequest) {
        let server = MockServer::start().await;
        let (gateway, locator) = gateway_for(&server);

        Mock::given(method("POST"))
            .and(path(PULLS_PATH))
            .and(body_json(json!({
                "head": "feature-x",
                "base": "main",
                "title": "Merge feature-x",
                "body": "Automated pull request"
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(pull_request_json(8, "feature-x", "main")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let created = gateway
            .create_pull_request(&locator, &new_pull_request)
            .await
            .expect("create should succeed");

        assert_eq!(created.number, 8);
        assert_eq!(created.id, 9008);
        assert_eq!(
            created.url.as_deref(),
            Some("https://api.github.com/repos/octo/repo/pulls/8")
        );
    }

    #[rstest]
    #[case::unauthorised(401, "Bad credentials", None, UpstreamKind::Authentication)]
    #[case::forbidden(403, "Resource not accessible by integration", None, UpstreamKind::Authentication)]
    #[case::rate_limited(
        403,
        "API rate limit exceeded for installation",
        Some("https://docs.github.com/rest/overview/resources-in-the-rest-api#rate-limiting"),
        UpstreamKind::RateLimited
    )]
    #[case::validation(422, "Validation Failed", None, UpstreamKind::Api)]
    #[tokio::test]
    async fn create_maps_error_statuses(
        new_pull_request: NewPullRequest,
        #[case] status: u16,
        #[case] message: &str,
        #[case] documentation_url: Option<&str>,
        #[case] expected_kind: UpstreamKind,
    ) {
        let server = MockServer::start().await;
        let (gateway, locator) = gateway_for(&server);

        Mock::given(method("POST"))
            .and(path(PULLS_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "message": message,
                "documentation_url": documentation_url
            })))
            .mount(&server)
            .await;

        let error = gateway
            .create_pull_request(&locator, &new_pull_request)
            .await
            .expect_err("request should fail");

        match error {
            SyncError::Upstream {
                kind,
                message: detail,
            } => {
                assert_eq!(kind, expected_kind, "unexpected kind for {status}");
                assert!(
                    detail.contains(message),
                    "expected `{message}` in `{detail}`"
                );
                assert!(
                    detail.starts_with("create pull request"),
                    "expected operation prefix in `{detail}`"
                );
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_maps_malformed_response_to_api_error() {
        let server = MockServer::start().await;
        let (gateway, locator) = gateway_for(&server);

        Mock::given(method("GET"))
            .and(path(PULLS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "not": "a list" })))
            .mount(&server)
            .await;

        let error = gateway
            .list_open_pull_requests(&locator, "feature-x", "main")
            .await
            .expect_err("malformed body should fail");

        assert!(
            matches!(
                error,
                SyncError::Upstream {
                    kind: UpstreamKind::Api,
                    ..
                }
            ),
            "expected Api upstream error, got {error:?}"
        );
    }

    #[tokio::test]
    async fn list_maps_unreachable_host_to_upstream_error() {
        let server = MockServer::start().await;
        let (gateway, locator) = gateway_for(&server);
        drop(server);

        let error = gateway
            .list_open_pull_requests(&locator, "feature-x", "main")
            .await
            .expect_err("request to stopped server should fail");

        assert!(error.is_upstream(), "expected upstream error, got {error:?}");
    }
}
