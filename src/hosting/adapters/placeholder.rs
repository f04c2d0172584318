//! Placeholder providers for platforms without a REST backend yet.

use crate::hosting::{
    domain::{
        Comment, CreateIssue, CreatePullRequest, HostingPlatform, Issue, Label, ListOptions,
        PullRequest, Repository, RepositoryFullName, Review, UpdateIssue, UpdatePullRequest, User,
    },
    ports::{HostingError, HostingProvider, HostingResult},
};
use async_trait::async_trait;

/// Provider whose every operation fails with
/// [`HostingError::NotImplemented`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderProvider {
    platform: HostingPlatform,
}

impl PlaceholderProvider {
    /// Placeholder for GitLab.
    #[must_use]
    pub const fn gitlab() -> Self {
        Self {
            platform: HostingPlatform::GitLab,
        }
    }

    /// Placeholder for Bitbucket.
    #[must_use]
    pub const fn bitbucket() -> Self {
        Self {
            platform: HostingPlatform::Bitbucket,
        }
    }

    const fn unsupported<T>(&self, operation: &'static str) -> HostingResult<T> {
        Err(HostingError::NotImplemented {
            platform: self.platform,
            operation,
        })
    }
}

#[async_trait]
impl HostingProvider for PlaceholderProvider {
    fn platform(&self) -> HostingPlatform {
        self.platform
    }

    async fn current_user(&self) -> HostingResult<User> {
        self.unsupported("current_user")
    }

    async fn get_repository(&self, _repo: &RepositoryFullName) -> HostingResult<Repository> {
        self.unsupported("get_repository")
    }

    async fn list_issues(
        &self,
        _repo: &RepositoryFullName,
        _options: &ListOptions,
    ) -> HostingResult<Vec<Issue>> {
        self.unsupported("list_issues")
    }

    async fn get_issue(&self, _repo: &RepositoryFullName, _number: u64) -> HostingResult<Issue> {
        self.unsupported("get_issue")
    }

    async fn create_issue(
        &self,
        _repo: &RepositoryFullName,
        _request: &CreateIssue,
    ) -> HostingResult<Issue> {
        self.unsupported("create_issue")
    }

    async fn update_issue(
        &self,
        _repo: &RepositoryFullName,
        _number: u64,
        _request: &UpdateIssue,
    ) -> HostingResult<Issue> {
        self.unsupported("update_issue")
    }

    async fn list_pull_requests(
        &self,
        _repo: &RepositoryFullName,
        _options: &ListOptions,
    ) -> HostingResult<Vec<PullRequest>> {
        self.unsupported("list_pull_requests")
    }

    async fn get_pull_request(
        &self,
        _repo: &RepositoryFullName,
        _number: u64,
    ) -> HostingResult<PullRequest> {
        self.unsupported("get_pull_request")
    }

    async fn create_pull_request(
        &self,
        _repo: &RepositoryFullName,
        _request: &CreatePullRequest,
    ) -> HostingResult<PullRequest> {
        self.unsupported("create_pull_request")
    }

    async fn update_pull_request(
        &self,
        _repo: &RepositoryFullName,
        _number: u64,
        _request: &UpdatePullRequest,
    ) -> HostingResult<PullRequest> {
        self.unsupported("update_pull_request")
    }

    async fn list_reviews(
        &self,
        _repo: &RepositoryFullName,
        _pull_request: u64,
        _options: &ListOptions,
    ) -> HostingResult<Vec<Review>> {
        self.unsupported("list_reviews")
    }

    async fn list_comments(
        &self,
        _repo: &RepositoryFullName,
        _issue_number: u64,
        _options: &ListOptions,
    ) -> HostingResult<Vec<Comment>> {
        self.unsupported("list_comments")
    }

    async fn create_comment(
        &self,
        _repo: &RepositoryFullName,
        _issue_number: u64,
        _body: &str,
    ) -> HostingResult<Comment> {
        self.unsupported("create_comment")
    }

    async fn list_labels(
        &self,
        _repo: &RepositoryFullName,
        _options: &ListOptions,
    ) -> HostingResult<Vec<Label>> {
        self.unsupported("list_labels")
    }

    async fn find_pull_request_by_branch(
        &self,
        _repo: &RepositoryFullName,
        _branch: &str,
    ) -> HostingResult<PullRequest> {
        self.unsupported("find_pull_request_by_branch")
    }

    async fn find_pull_request_for_issue(
        &self,
        _repo: &RepositoryFullName,
        _issue_number: u64,
    ) -> HostingResult<PullRequest> {
        self.unsupported("find_pull_request_for_issue")
    }
}
