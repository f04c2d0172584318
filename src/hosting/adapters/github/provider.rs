//! GitHub REST API provider.

use super::convert;
use super::models::{
    GhComment, GhCreateComment, GhCreateIssue, GhCreatePullRequest, GhErrorBody, GhIssue,
    GhLabel, GhPullRequest, GhRepository, GhReview, GhUpdateIssue, GhUpdatePullRequest, GhUser,
};
use crate::hosting::{
    domain::{
        Comment, CreateIssue, CreatePullRequest, HostingPlatform, Issue, Label, ListOptions,
        PullRequest, Repository, RepositoryFullName, Review, StateFilter, UpdateIssue,
        UpdatePullRequest, User,
    },
    ports::{HostingError, HostingProvider, HostingResult},
};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Public GitHub API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("tasksync/", env!("CARGO_PKG_VERSION"));
const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// GitHub (and GitHub Enterprise) REST provider.
#[derive(Debug, Clone)]
pub struct GitHubProvider {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl GitHubProvider {
    /// Creates a provider against the public GitHub API.
    ///
    /// # Errors
    ///
    /// Returns [`HostingError::Validation`] when the token is empty.
    pub fn new(token: impl Into<String>) -> HostingResult<Self> {
        Self::with_base_url(token, DEFAULT_API_BASE_URL)
    }

    /// Creates a provider against a self-hosted API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`HostingError::Validation`] when the token or base URL is
    /// empty, and [`HostingError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn with_base_url(
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> HostingResult<Self> {
        let raw_token = token.into();
        let trimmed_token = raw_token.trim();
        if trimmed_token.is_empty() {
            return Err(HostingError::Validation(
                "GitHub token must not be empty".to_owned(),
            ));
        }
        let raw_base = base_url.into();
        let trimmed_base = raw_base.trim().trim_end_matches('/');
        if trimmed_base.is_empty() {
            return Err(HostingError::Validation(
                "GitHub API base URL must not be empty".to_owned(),
            ));
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(HostingError::transport)?;

        Ok(Self {
            client,
            base_url: trimmed_base.to_owned(),
            token: trimmed_token.to_owned(),
        })
    }

    /// Returns the API base URL in use.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn repo_path(repo: &RepositoryFullName, suffix: &str) -> String {
        if suffix.is_empty() {
            format!("repos/{}/{}", repo.owner(), repo.name())
        } else {
            format!("repos/{}/{}/{suffix}", repo.owner(), repo.name())
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> HostingResult<T> {
        let response = builder.send().await.map_err(HostingError::transport)?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "github response");
        if !status.is_success() {
            return Err(error_from_response(response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|err| HostingError::Decode(err.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> HostingResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> HostingResult<Vec<T>> {
        self.send(self.request(Method::GET, path).query(query)).await
    }
}

/// Builds query parameters for list endpoints.
///
/// `head_owner` qualifies a head-branch filter as GitHub expects
/// (`owner:branch`).
pub(crate) fn list_query(
    options: &ListOptions,
    head_owner: Option<&str>,
) -> Vec<(&'static str, String)> {
    let state = match options.state {
        StateFilter::Open => "open",
        StateFilter::Closed => "closed",
        StateFilter::All => "all",
    };
    let mut query = vec![
        ("state", state.to_owned()),
        ("page", options.page.max(1).to_string()),
        ("per_page", options.per_page.clamp(1, 100).to_string()),
        ("direction", options.direction.as_str().to_owned()),
    ];
    if let Some(sort) = &options.sort {
        query.push(("sort", sort.clone()));
    }
    if let Some(assignee) = &options.assignee {
        query.push(("assignee", assignee.clone()));
    }
    if let Some(since) = options.since {
        query.push(("since", since.to_rfc3339()));
    }
    if let (Some(head), Some(owner)) = (&options.head, head_owner) {
        query.push(("head", format!("{owner}:{head}")));
    }
    query
}

/// Maps a non-success status to a hosting error, keeping GitHub's message.
pub(crate) fn classify_error(
    status: StatusCode,
    rate_limit_exhausted: bool,
    body: &str,
) -> HostingError {
    let platform_message = serde_json::from_str::<GhErrorBody>(body)
        .ok()
        .map(|parsed| parsed.message)
        .filter(|message| !message.trim().is_empty());
    let reason = status.canonical_reason().unwrap_or("unknown status");
    let message = platform_message.map_or_else(
        || format!("{} {reason}", status.as_u16()),
        |text| format!("{} {reason}: {text}", status.as_u16()),
    );

    match status {
        StatusCode::UNAUTHORIZED => HostingError::Unauthorized(message),
        StatusCode::FORBIDDEN if rate_limit_exhausted => HostingError::RateLimited(message),
        StatusCode::TOO_MANY_REQUESTS => HostingError::RateLimited(message),
        StatusCode::NOT_FOUND => HostingError::NotFound(message),
        StatusCode::UNPROCESSABLE_ENTITY => HostingError::Unprocessable(message),
        other => HostingError::Api {
            status: other.as_u16(),
            message,
        },
    }
}

async fn error_from_response(response: Response) -> HostingError {
    let status = response.status();
    let rate_limit_exhausted = response
        .headers()
        .get(RATE_LIMIT_REMAINING_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim() == "0");
    let body = response.text().await.unwrap_or_default();
    classify_error(status, rate_limit_exhausted, &body)
}

#[async_trait]
impl HostingProvider for GitHubProvider {
    fn platform(&self) -> HostingPlatform {
        HostingPlatform::GitHub
    }

    async fn current_user(&self) -> HostingResult<User> {
        let raw: GhUser = self.get("user").await?;
        Ok(convert::user(raw))
    }

    async fn get_repository(&self, repo: &RepositoryFullName) -> HostingResult<Repository> {
        let raw: GhRepository = self.get(&Self::repo_path(repo, "")).await?;
        Ok(convert::repository(raw))
    }

    async fn list_issues(
        &self,
        repo: &RepositoryFullName,
        options: &ListOptions,
    ) -> HostingResult<Vec<Issue>> {
        let raw: Vec<GhIssue> = self
            .get_list(&Self::repo_path(repo, "issues"), &list_query(options, None))
            .await?;
        Ok(raw.into_iter().map(convert::issue).collect())
    }

    async fn get_issue(&self, repo: &RepositoryFullName, number: u64) -> HostingResult<Issue> {
        let raw: GhIssue = self
            .get(&Self::repo_path(repo, &format!("issues/{number}")))
            .await?;
        Ok(convert::issue(raw))
    }

    async fn create_issue(
        &self,
        repo: &RepositoryFullName,
        request: &CreateIssue,
    ) -> HostingResult<Issue> {
        if request.title.trim().is_empty() {
            return Err(HostingError::Validation(
                "issue title must not be empty".to_owned(),
            ));
        }
        let payload = GhCreateIssue {
            title: &request.title,
            body: request.body.as_deref(),
            labels: &request.labels,
            assignees: &request.assignees,
        };
        let raw: GhIssue = self
            .send(
                self.request(Method::POST, &Self::repo_path(repo, "issues"))
                    .json(&payload),
            )
            .await?;
        Ok(convert::issue(raw))
    }

    async fn update_issue(
        &self,
        repo: &RepositoryFullName,
        number: u64,
        request: &UpdateIssue,
    ) -> HostingResult<Issue> {
        let payload = GhUpdateIssue {
            title: request.title.as_deref(),
            body: request.body.as_deref(),
            state: request.state.as_deref(),
            labels: request.labels.as_deref(),
            assignees: request.assignees.as_deref(),
        };
        let raw: GhIssue = self
            .send(
                self.request(
                    Method::PATCH,
                    &Self::repo_path(repo, &format!("issues/{number}")),
                )
                .json(&payload),
            )
            .await?;
        Ok(convert::issue(raw))
    }

    async fn list_pull_requests(
        &self,
        repo: &RepositoryFullName,
        options: &ListOptions,
    ) -> HostingResult<Vec<PullRequest>> {
        let raw: Vec<GhPullRequest> = self
            .get_list(
                &Self::repo_path(repo, "pulls"),
                &list_query(options, Some(repo.owner())),
            )
            .await?;
        Ok(raw.into_iter().map(convert::pull_request).collect())
    }

    async fn get_pull_request(
        &self,
        repo: &RepositoryFullName,
        number: u64,
    ) -> HostingResult<PullRequest> {
        let raw: GhPullRequest = self
            .get(&Self::repo_path(repo, &format!("pulls/{number}")))
            .await?;
        Ok(convert::pull_request(raw))
    }

    async fn create_pull_request(
        &self,
        repo: &RepositoryFullName,
        request: &CreatePullRequest,
    ) -> HostingResult<PullRequest> {
        if request.title.trim().is_empty() || request.head.trim().is_empty() {
            return Err(HostingError::Validation(
                "pull request title and head branch must not be empty".to_owned(),
            ));
        }
        let payload = GhCreatePullRequest {
            title: &request.title,
            body: request.body.as_deref(),
            head: &request.head,
            base: &request.base,
            draft: request.draft,
        };
        let raw: GhPullRequest = self
            .send(
                self.request(Method::POST, &Self::repo_path(repo, "pulls"))
                    .json(&payload),
            )
            .await?;
        Ok(convert::pull_request(raw))
    }

    async fn update_pull_request(
        &self,
        repo: &RepositoryFullName,
        number: u64,
        request: &UpdatePullRequest,
    ) -> HostingResult<PullRequest> {
        let payload = GhUpdatePullRequest {
            title: request.title.as_deref(),
            body: request.body.as_deref(),
            state: request.state.as_deref(),
            base: request.base.as_deref(),
        };
        let raw: GhPullRequest = self
            .send(
                self.request(
                    Method::PATCH,
                    &Self::repo_path(repo, &format!("pulls/{number}")),
                )
                .json(&payload),
            )
            .await?;
        Ok(convert::pull_request(raw))
    }

    async fn list_reviews(
        &self,
        repo: &RepositoryFullName,
        pull_request: u64,
        options: &ListOptions,
    ) -> HostingResult<Vec<Review>> {
        let raw: Vec<GhReview> = self
            .get_list(
                &Self::repo_path(repo, &format!("pulls/{pull_request}/reviews")),
                &page_query(options),
            )
            .await?;
        Ok(raw.into_iter().map(convert::review).collect())
    }

    async fn list_comments(
        &self,
        repo: &RepositoryFullName,
        issue_number: u64,
        options: &ListOptions,
    ) -> HostingResult<Vec<Comment>> {
        let mut query = page_query(options);
        if let Some(since) = options.since {
            query.push(("since", since.to_rfc3339()));
        }
        let raw: Vec<GhComment> = self
            .get_list(
                &Self::repo_path(repo, &format!("issues/{issue_number}/comments")),
                &query,
            )
            .await?;
        Ok(raw.into_iter().map(convert::comment).collect())
    }

    async fn create_comment(
        &self,
        repo: &RepositoryFullName,
        issue_number: u64,
        body: &str,
    ) -> HostingResult<Comment> {
        if body.trim().is_empty() {
            return Err(HostingError::Validation(
                "comment body must not be empty".to_owned(),
            ));
        }
        let raw: GhComment = self
            .send(
                self.request(
                    Method::POST,
                    &Self::repo_path(repo, &format!("issues/{issue_number}/comments")),
                )
                .json(&GhCreateComment { body }),
            )
            .await?;
        Ok(convert::comment(raw))
    }

    async fn list_labels(
        &self,
        repo: &RepositoryFullName,
        options: &ListOptions,
    ) -> HostingResult<Vec<Label>> {
        let raw: Vec<GhLabel> = self
            .get_list(&Self::repo_path(repo, "labels"), &page_query(options))
            .await?;
        Ok(raw.into_iter().map(convert::label).collect())
    }
}

/// Pagination-only query for endpoints without state filters.
fn page_query(options: &ListOptions) -> Vec<(&'static str, String)> {
    vec![
        ("page", options.page.max(1).to_string()),
        ("per_page", options.per_page.clamp(1, 100).to_string()),
    ]
}
