//! GitHub REST API metadata source.
//!
//! [`GitHubClient`] implements [`MetadataSource`] against
//! `/repos/{owner}/{repo}` and `/repos/{owner}/{repo}/commits`. Failures are
//! mapped onto [`RepoCardError`]: 404 → `NotFound`, an exhausted rate limit
//! (403 with `x-ratelimit-remaining: 0`, or 429) → `RateLimited`, anything
//! else → `Network`.

mod api;

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};
use url::Url;

use repocard_shared::{
    AppConfig, CommitRecord, MetadataSource, RepoCardError, RepositoryId, RepositoryMetadata,
    Result, github_token,
};

use api::{ApiCommit, ApiRepository};

/// Largest page the commits endpoint serves.
pub const MAX_COMMITS_PER_PAGE: u32 = 100;

/// Default timeout in seconds for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// User-Agent string for API requests (GitHub rejects requests without one).
const USER_AGENT: &str = concat!("RepoCard-Studio/", env!("CARGO_PKG_VERSION"));

const ACCEPT: &str = "application/vnd.github+json";

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Connection settings for [`GitHubClient`].
#[derive(Debug, Clone)]
pub struct GitHubOptions {
    /// REST API base URL.
    pub api_base_url: String,
    /// Bearer token, if any.
    pub token: Option<String>,
    /// Timeout for HTTP requests in seconds.
    pub timeout_secs: u64,
}

impl Default for GitHubOptions {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".into(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GitHubOptions {
    /// Options from the `[github]` config section, reading the token from
    /// the configured environment variable.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            api_base_url: config.github.api_base_url.clone(),
            token: github_token(config),
            timeout_secs: config.github.timeout_secs,
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP metadata source backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(opts: &GitHubOptions) -> Result<Self> {
        let base = Url::parse(opts.api_base_url.trim()).map_err(|e| {
            RepoCardError::config(format!("invalid api_base_url '{}': {e}", opts.api_base_url))
        })?;
        if base.cannot_be_a_base() {
            return Err(RepoCardError::config(format!(
                "api_base_url cannot be used as a base: {base}"
            )));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(opts.timeout_secs))
            .build()
            .map_err(|e| RepoCardError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base,
            token: opts.token.clone().filter(|t| !t.trim().is_empty()),
        })
    }

    /// `<base>/repos/<owner>/<repo>/<tail...>`, with each segment encoded.
    fn endpoint(&self, id: &RepositoryId, tail: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", id.owner.as_str(), id.repo.as_str()])
                .extend(tail);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, id: &RepositoryId, url: Url) -> Result<T> {
        debug!(%url, "GET");

        let mut request = self.client.get(url).header("Accept", ACCEPT);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RepoCardError::Network(format!("{id}: {e}")))?;

        let response = check_status(id, response).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| RepoCardError::parse(format!("{id}: unexpected API response: {e}")))
    }
}

impl MetadataSource for GitHubClient {
    #[instrument(skip_all, fields(repo = %id))]
    async fn fetch_metadata(&self, id: &RepositoryId) -> Result<RepositoryMetadata> {
        let url = self.endpoint(id, &[]);
        let repo: ApiRepository = self.get_json(id, url).await?;
        let metadata = RepositoryMetadata::from(repo);

        info!(
            full_name = %metadata.full_name,
            stars = metadata.stars,
            "repository metadata fetched"
        );
        Ok(metadata)
    }

    #[instrument(skip_all, fields(repo = %id, count = count))]
    async fn fetch_commits(&self, id: &RepositoryId, count: u32) -> Result<Vec<CommitRecord>> {
        let per_page = count.min(MAX_COMMITS_PER_PAGE);
        if per_page == 0 {
            return Ok(Vec::new());
        }

        let mut url = self.endpoint(id, &["commits"]);
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string());

        let commits: Vec<ApiCommit> = self.get_json(id, url).await?;
        let records: Vec<CommitRecord> = commits
            .into_iter()
            .take(per_page as usize)
            .map(CommitRecord::from)
            .collect();

        info!(fetched = records.len(), "recent commits fetched");
        Ok(records)
    }
}

/// Map non-success statuses onto the error model.
async fn check_status(id: &RepositoryId, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let remaining = header_value(&response, "x-ratelimit-remaining");
    let reset = header_value(&response, "x-ratelimit-reset");
    let body = response.text().await.unwrap_or_default();
    let detail = api_message(&body).unwrap_or_else(|| status.to_string());

    match status {
        StatusCode::NOT_FOUND => Err(RepoCardError::NotFound(id.to_string())),
        StatusCode::TOO_MANY_REQUESTS => Err(rate_limited(id, reset.as_deref(), &detail)),
        StatusCode::FORBIDDEN if remaining.as_deref() == Some("0") => {
            Err(rate_limited(id, reset.as_deref(), &detail))
        }
        _ => Err(RepoCardError::Network(format!(
            "{id}: HTTP {status}: {detail}"
        ))),
    }
}

fn rate_limited(id: &RepositoryId, reset: Option<&str>, detail: &str) -> RepoCardError {
    match reset {
        Some(reset) => RepoCardError::RateLimited(format!(
            "{id}: {detail} (limit resets at unix time {reset})"
        )),
        None => RepoCardError::RateLimited(format!("{id}: {detail}")),
    }
}

fn header_value(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// The `message` field of a GitHub error body, if present.
fn api_message(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ApiError {
        message: String,
    }

    serde_json::from_str::<ApiError>(body)
        .ok()
        .map(|e| e.message)
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, token: Option<&str>) -> GitHubClient {
        GitHubClient::new(&GitHubOptions {
            api_base_url: server.uri(),
            token: token.map(str::to_string),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn repo_body() -> serde_json::Value {
        json!({
            "name": "vscode",
            "full_name": "Microsoft/vscode",
            "description": "Visual Studio Code",
            "html_url": "https://github.com/microsoft/vscode",
            "stargazers_count": 150000,
            "forks_count": 26000,
            "watchers_count": 150000,
            "open_issues_count": 9000,
            "language": "TypeScript",
            "topics": ["editor", "electron"],
            "created_at": "2015-09-03T20:23:38Z",
            "updated_at": "2024-06-01T00:00:00Z",
            "pushed_at": "2024-06-01T12:00:00Z",
            "default_branch": "main",
            "license": {"key": "mit", "name": "MIT License", "spdx_id": "MIT"},
            "owner": {
                "login": "microsoft",
                "avatar_url": "https://avatars.githubusercontent.com/u/6154722",
                "html_url": "https://github.com/microsoft"
            }
        })
    }

    fn commit_body(sha: &str, message: &str) -> serde_json::Value {
        json!({
            "sha": sha,
            "commit": {
                "message": message,
                "author": {"name": "Ada", "email": "ada@example.com", "date": "2024-06-01T00:00:00Z"}
            }
        })
    }

    #[tokio::test]
    async fn fetches_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/microsoft/vscode"))
            .and(header("accept", ACCEPT))
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_body()))
            .mount(&server)
            .await;

        let id = RepositoryId::new("microsoft", "vscode");
        let meta = client_for(&server, None).fetch_metadata(&id).await.unwrap();

        assert_eq!(meta.name, "vscode");
        assert_eq!(meta.full_name, "microsoft/vscode");
        assert_eq!(meta.stars, 150000);
        assert_eq!(meta.topics, vec!["editor", "electron"]);
        assert_eq!(meta.owner.url, "https://github.com/microsoft");
        assert_eq!(meta.license.as_ref().unwrap().badge_id(), "MIT");
        assert!(meta.validate().is_ok());
    }

    #[tokio::test]
    async fn sends_bearer_token_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/microsoft/vscode"))
            .and(header("authorization", "Bearer secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_body()))
            .expect(1)
            .mount(&server)
            .await;

        let id = RepositoryId::new("microsoft", "vscode");
        let meta = client_for(&server, Some("secret-token"))
            .fetch_metadata(&id)
            .await;
        assert!(meta.is_ok());
    }

    #[tokio::test]
    async fn missing_repository_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/nobody/nothing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})),
            )
            .mount(&server)
            .await;

        let id = RepositoryId::new("nobody", "nothing");
        let err = client_for(&server, None).fetch_metadata(&id).await.unwrap_err();
        assert!(matches!(err, RepoCardError::NotFound(_)));
        assert!(err.to_string().contains("nobody/nothing"));
    }

    #[tokio::test]
    async fn exhausted_rate_limit_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/microsoft/vscode"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("x-ratelimit-remaining", "0")
                    .insert_header("x-ratelimit-reset", "1717200000")
                    .set_body_json(json!({"message": "API rate limit exceeded"})),
            )
            .mount(&server)
            .await;

        let id = RepositoryId::new("microsoft", "vscode");
        let err = client_for(&server, None).fetch_metadata(&id).await.unwrap_err();
        assert!(matches!(err, RepoCardError::RateLimited(_)));
        let msg = err.to_string();
        assert!(msg.contains("API rate limit exceeded"));
        assert!(msg.contains("1717200000"));
    }

    #[tokio::test]
    async fn plain_forbidden_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/microsoft/vscode"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("x-ratelimit-remaining", "42")
                    .set_body_json(json!({"message": "Repository access blocked"})),
            )
            .mount(&server)
            .await;

        let id = RepositoryId::new("microsoft", "vscode");
        let err = client_for(&server, None).fetch_metadata(&id).await.unwrap_err();
        assert!(matches!(err, RepoCardError::Network(_)));
        assert!(err.to_string().contains("Repository access blocked"));
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/microsoft/vscode"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let id = RepositoryId::new("microsoft", "vscode");
        let err = client_for(&server, None).fetch_metadata(&id).await.unwrap_err();
        assert!(matches!(err, RepoCardError::Parse { .. }));
    }

    #[tokio::test]
    async fn commits_are_first_line_with_full_sha() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/microsoft/vscode/commits"))
            .and(query_param("per_page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                commit_body("0123456789abcdef0123456789abcdef01234567", "feat: new thing\n\nLong body"),
                commit_body("fedcba9876543210fedcba9876543210fedcba98", "fix: old thing"),
            ])))
            .mount(&server)
            .await;

        let id = RepositoryId::new("microsoft", "vscode");
        let commits = client_for(&server, None)
            .fetch_commits(&id, 2)
            .await
            .unwrap();

        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].message, "feat: new thing");
        assert_eq!(commits[0].sha.len(), 40);
        assert_eq!(commits[0].short_sha(), "0123456");
        assert_eq!(commits[1].author_name, "Ada");
    }

    #[tokio::test]
    async fn commit_count_is_capped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/microsoft/vscode/commits"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                commit_body("a", "one"),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let id = RepositoryId::new("microsoft", "vscode");
        let commits = client_for(&server, None)
            .fetch_commits(&id, 500)
            .await
            .unwrap();
        // Fewer than requested is returned as-is, never padded.
        assert_eq!(commits.len(), 1);
    }

    #[tokio::test]
    async fn zero_commits_skips_the_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let id = RepositoryId::new("microsoft", "vscode");
        let commits = client_for(&server, None).fetch_commits(&id, 0).await.unwrap();
        assert!(commits.is_empty());
    }

    #[test]
    fn endpoint_keeps_base_path_and_encodes_segments() {
        let client = GitHubClient::new(&GitHubOptions {
            api_base_url: "https://ghe.example.com/api/v3/".into(),
            ..GitHubOptions::default()
        })
        .unwrap();
        let id = RepositoryId::new("team", "my repo");
        let url = client.endpoint(&id, &["commits"]);
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/repos/team/my%20repo/commits"
        );
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let err = GitHubClient::new(&GitHubOptions {
            api_base_url: "not a url".into(),
            ..GitHubOptions::default()
        })
        .unwrap_err();
        assert!(matches!(err, RepoCardError::Config { .. }));
    }
}
