//! Hosting provider contract and its error type.

use crate::hosting::domain::{
    Comment, CreateIssue, CreatePullRequest, HostingPlatform, Issue, Label, ListOptions,
    PullRequest, Repository, RepositoryFullName, Review, StateFilter, UpdateIssue,
    UpdatePullRequest, User,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Page size used by the default branch lookup.
const BRANCH_LOOKUP_PAGE_SIZE: u32 = 100;

/// Result type for hosting provider operations.
pub type HostingResult<T> = Result<T, HostingError>;

/// Capability set every hosting backend implements identically.
///
/// Reads return canonical records or a descriptive [`HostingError`]. State
/// strings are passed through in the platform's own vocabulary.
#[async_trait]
pub trait HostingProvider: Send + Sync {
    /// Returns the platform this provider talks to.
    fn platform(&self) -> HostingPlatform;

    /// Verifies the credentials and returns the acting identity.
    async fn current_user(&self) -> HostingResult<User>;

    /// Fetches a repository snapshot.
    async fn get_repository(&self, repo: &RepositoryFullName) -> HostingResult<Repository>;

    /// Lists issues. Platforms that serve pull requests through the issue
    /// endpoint return them flagged with [`Issue::is_pull_request`].
    async fn list_issues(
        &self,
        repo: &RepositoryFullName,
        options: &ListOptions,
    ) -> HostingResult<Vec<Issue>>;

    /// Fetches a single issue.
    async fn get_issue(&self, repo: &RepositoryFullName, number: u64) -> HostingResult<Issue>;

    /// Creates an issue.
    async fn create_issue(
        &self,
        repo: &RepositoryFullName,
        request: &CreateIssue,
    ) -> HostingResult<Issue>;

    /// Applies a partial update to an issue.
    async fn update_issue(
        &self,
        repo: &RepositoryFullName,
        number: u64,
        request: &UpdateIssue,
    ) -> HostingResult<Issue>;

    /// Lists pull requests.
    async fn list_pull_requests(
        &self,
        repo: &RepositoryFullName,
        options: &ListOptions,
    ) -> HostingResult<Vec<PullRequest>>;

    /// Fetches a single pull request.
    async fn get_pull_request(
        &self,
        repo: &RepositoryFullName,
        number: u64,
    ) -> HostingResult<PullRequest>;

    /// Opens a pull request.
    async fn create_pull_request(
        &self,
        repo: &RepositoryFullName,
        request: &CreatePullRequest,
    ) -> HostingResult<PullRequest>;

    /// Applies a partial update to a pull request.
    async fn update_pull_request(
        &self,
        repo: &RepositoryFullName,
        number: u64,
        request: &UpdatePullRequest,
    ) -> HostingResult<PullRequest>;

    /// Lists reviews submitted on a pull request.
    async fn list_reviews(
        &self,
        repo: &RepositoryFullName,
        pull_request: u64,
        options: &ListOptions,
    ) -> HostingResult<Vec<Review>>;

    /// Lists conversation comments on an issue or pull request.
    async fn list_comments(
        &self,
        repo: &RepositoryFullName,
        issue_number: u64,
        options: &ListOptions,
    ) -> HostingResult<Vec<Comment>>;

    /// Adds a conversation comment to an issue or pull request.
    async fn create_comment(
        &self,
        repo: &RepositoryFullName,
        issue_number: u64,
        body: &str,
    ) -> HostingResult<Comment>;

    /// Lists labels defined on the repository.
    async fn list_labels(
        &self,
        repo: &RepositoryFullName,
        options: &ListOptions,
    ) -> HostingResult<Vec<Label>>;

    /// Returns the first pull request whose head is `branch`.
    ///
    /// # Errors
    ///
    /// Returns [`HostingError::NoPullRequestForBranch`] when none matches.
    async fn find_pull_request_by_branch(
        &self,
        repo: &RepositoryFullName,
        branch: &str,
    ) -> HostingResult<PullRequest> {
        let options = ListOptions::default()
            .with_state(StateFilter::All)
            .with_page(1, BRANCH_LOOKUP_PAGE_SIZE)
            .with_head(branch);
        self.list_pull_requests(repo, &options)
            .await?
            .into_iter()
            .find(|pull_request| pull_request.head.ref_name == branch)
            .ok_or_else(|| HostingError::NoPullRequestForBranch(branch.to_owned()))
    }

    /// Returns the pull request behind an issue number.
    ///
    /// # Errors
    ///
    /// Returns [`HostingError::NotAPullRequest`] when the issue is a plain
    /// issue.
    async fn find_pull_request_for_issue(
        &self,
        repo: &RepositoryFullName,
        issue_number: u64,
    ) -> HostingResult<PullRequest> {
        let issue = self.get_issue(repo, issue_number).await?;
        if !issue.is_pull_request {
            return Err(HostingError::NotAPullRequest(issue_number));
        }
        self.get_pull_request(repo, issue_number).await
    }
}

/// Errors returned by hosting providers.
///
/// Remote failures keep the platform's status text in the message.
#[derive(Debug, Clone, Error)]
pub enum HostingError {
    /// Input rejected before any request was made.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Credentials missing, expired, or rejected.
    #[error("authentication failed: {0}")]
    Unauthorized(String),

    /// The platform's rate limit is exhausted.
    #[error("rate limit exceeded: {0}")]
    RateLimited(String),

    /// The addressed resource does not exist or is not visible.
    #[error("not found: {0}")]
    NotFound(String),

    /// The platform rejected the payload.
    #[error("unprocessable entity: {0}")]
    Unprocessable(String),

    /// Any other non-success response.
    #[error("hosting API error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Platform message.
        message: String,
    },

    /// Connection or protocol failure.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// Response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// No pull request has the branch as its head.
    #[error("no pull request found for branch {0}")]
    NoPullRequestForBranch(String),

    /// The issue number refers to a plain issue.
    #[error("issue #{0} is not a pull request")]
    NotAPullRequest(u64),

    /// The backend is a placeholder.
    #[error("{platform} provider does not implement {operation} yet")]
    NotImplemented {
        /// Platform of the placeholder backend.
        platform: HostingPlatform,
        /// Operation that was called.
        operation: &'static str,
    },
}

impl HostingError {
    /// Wraps a transport-layer error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
