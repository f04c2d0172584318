//! Canonical repository, issue, pull request and feedback records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account on the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login handle.
    pub login: String,
    /// Platform-scoped numeric identifier.
    pub id: u64,
    /// Display name, when public.
    pub name: Option<String>,
    /// Public email, when exposed.
    pub email: Option<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Profile page URL.
    pub url: Option<String>,
}

impl User {
    /// Creates a user with only a login and identifier.
    #[must_use]
    pub fn new(login: impl Into<String>, id: u64) -> Self {
        Self {
            login: login.into(),
            id,
            name: None,
            email: None,
            avatar_url: None,
            url: None,
        }
    }
}

/// Issue or pull request label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Label name.
    pub name: String,
    /// Hex colour without the leading `#`.
    pub color: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
}

impl Label {
    /// Creates a label carrying only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
            description: None,
        }
    }
}

/// Snapshot of a remote repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Owning user or organization.
    pub owner: String,
    /// Repository name without owner.
    pub name: String,
    /// `owner/name`.
    pub full_name: String,
    /// Whether the repository is private.
    pub private: bool,
    /// Default branch name.
    pub default_branch: String,
    /// HTTPS clone URL, when reported.
    pub clone_url: Option<String>,
    /// Web URL.
    pub url: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Remote issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Platform-scoped, stable issue number.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Issue body.
    pub body: Option<String>,
    /// Literal platform state (`open`, `opened`, `closed`, ...).
    pub state: String,
    /// Author, absent for deleted accounts.
    pub author: Option<User>,
    /// Assigned users.
    pub assignees: Vec<User>,
    /// Applied labels.
    pub labels: Vec<Label>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Close timestamp.
    pub closed_at: Option<DateTime<Utc>>,
    /// Number of comments.
    pub comments: u64,
    /// Canonical web URL.
    pub url: String,
    /// Set when the platform returned a pull request through the issue
    /// endpoint.
    pub is_pull_request: bool,
}

impl Issue {
    /// Returns whether `login` is among the assignees (case-insensitive).
    #[must_use]
    pub fn is_assigned_to(&self, login: &str) -> bool {
        self.assignees
            .iter()
            .any(|assignee| assignee.login.eq_ignore_ascii_case(login))
    }

    /// Returns the applied label names.
    #[must_use]
    pub fn label_names(&self) -> Vec<String> {
        self.labels.iter().map(|label| label.name.clone()).collect()
    }
}

/// Branch descriptor embedded in a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Ref name without `refs/heads/`.
    pub ref_name: String,
    /// Tip commit SHA.
    pub sha: String,
    /// Repository owning the branch.
    pub repository: Option<Repository>,
    /// User owning the branch.
    pub user: Option<User>,
}

/// Remote pull (merge) request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Platform-scoped number.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Body.
    pub body: Option<String>,
    /// Literal platform state.
    pub state: String,
    /// Whether the pull request was merged.
    pub merged: bool,
    /// Merge timestamp.
    pub merged_at: Option<DateTime<Utc>>,
    /// Author.
    pub author: Option<User>,
    /// Assigned users.
    pub assignees: Vec<User>,
    /// Applied labels.
    pub labels: Vec<Label>,
    /// Source branch.
    pub head: Branch,
    /// Target branch.
    pub base: Branch,
    /// Draft flag.
    pub draft: bool,
    /// Mergeability: `None` while the platform has not computed it.
    pub mergeable: Option<bool>,
    /// Reviewers whose review is requested.
    pub requested_reviewers: Vec<User>,
    /// Number of comments.
    pub comments: u64,
    /// Canonical web URL.
    pub url: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Close timestamp.
    pub closed_at: Option<DateTime<Utc>>,
}

/// Pull request review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Review identifier.
    pub id: u64,
    /// Reviewer.
    pub author: Option<User>,
    /// Review summary body.
    pub body: Option<String>,
    /// Literal platform state (`APPROVED`, `CHANGES_REQUESTED`, ...).
    pub state: String,
    /// Submission timestamp; pending reviews have none.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Reviewed commit.
    pub commit_id: Option<String>,
    /// Web URL.
    pub url: Option<String>,
}

/// Issue or pull request conversation comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment identifier.
    pub id: u64,
    /// Author.
    pub author: Option<User>,
    /// Markdown body.
    pub body: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Web URL.
    pub url: Option<String>,
}
