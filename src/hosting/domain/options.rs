//! Request and list-option types accepted by providers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default page size for list operations.
const DEFAULT_PER_PAGE: u32 = 30;

/// State filter for list operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateFilter {
    /// Only open items.
    Open,
    /// Only closed (or merged) items.
    Closed,
    /// Every item regardless of state.
    #[default]
    All,
}

/// Sort direction for list operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Oldest first.
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

impl SortDirection {
    /// Returns the query-string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Options accepted by every list operation.
///
/// Defaults to all states, newest first, first page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    /// State filter.
    pub state: StateFilter,
    /// One-based page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Platform sort key (`created`, `updated`, ...).
    pub sort: Option<String>,
    /// Sort direction.
    pub direction: SortDirection,
    /// Restrict issues to an assignee login.
    pub assignee: Option<String>,
    /// Restrict pull requests to a head branch.
    pub head: Option<String>,
    /// Only items updated after this instant, where the platform supports it.
    pub since: Option<DateTime<Utc>>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            state: StateFilter::All,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            sort: None,
            direction: SortDirection::Desc,
            assignee: None,
            head: None,
            since: None,
        }
    }
}

impl ListOptions {
    /// Options listing only open items.
    #[must_use]
    pub fn open() -> Self {
        Self::default().with_state(StateFilter::Open)
    }

    /// Sets the state filter.
    #[must_use]
    pub const fn with_state(mut self, state: StateFilter) -> Self {
        self.state = state;
        self
    }

    /// Sets the page number and size.
    #[must_use]
    pub const fn with_page(mut self, page: u32, per_page: u32) -> Self {
        self.page = page;
        self.per_page = per_page;
        self
    }

    /// Sets the sort key and direction.
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(sort.into());
        self.direction = direction;
        self
    }

    /// Restricts results to an assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Restricts pull requests to a head branch.
    #[must_use]
    pub fn with_head(mut self, head: impl Into<String>) -> Self {
        self.head = Some(head.into());
        self
    }

    /// Restricts results to items updated after `since`.
    #[must_use]
    pub const fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }
}

/// Payload for creating an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIssue {
    /// Title (required).
    pub title: String,
    /// Body.
    pub body: Option<String>,
    /// Label names to apply.
    pub labels: Vec<String>,
    /// Assignee logins.
    pub assignees: Vec<String>,
}

/// Partial issue update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateIssue {
    /// New title.
    pub title: Option<String>,
    /// New body.
    pub body: Option<String>,
    /// New literal state.
    pub state: Option<String>,
    /// Replacement label set.
    pub labels: Option<Vec<String>>,
    /// Replacement assignee set.
    pub assignees: Option<Vec<String>>,
}

/// Payload for opening a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePullRequest {
    /// Title.
    pub title: String,
    /// Body.
    pub body: Option<String>,
    /// Source branch.
    pub head: String,
    /// Target branch.
    pub base: String,
    /// Open as draft.
    pub draft: bool,
}

/// Partial pull request update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePullRequest {
    /// New title.
    pub title: Option<String>,
    /// New body.
    pub body: Option<String>,
    /// New literal state.
    pub state: Option<String>,
    /// New target branch.
    pub base: Option<String>,
}
