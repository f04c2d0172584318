//! Issue metadata captured when a task is created.

use super::TaskDomainError;
use crate::hosting::domain::Issue;
use serde::{Deserialize, Serialize};

/// Snapshot of the remote issue at task-creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSnapshot {
    title: String,
    description: Option<String>,
    labels: Vec<String>,
    assignees: Vec<String>,
}

impl IssueSnapshot {
    /// Creates a snapshot with a required title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyIssueTitle`] if the title is empty.
    pub fn new(title: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw_title = title.into();
        let normalized_title = raw_title.trim();
        if normalized_title.is_empty() {
            return Err(TaskDomainError::EmptyIssueTitle);
        }

        Ok(Self {
            title: normalized_title.to_owned(),
            description: None,
            labels: Vec::new(),
            assignees: Vec::new(),
        })
    }

    /// Captures title, body, label names and assignee logins of a remote
    /// issue.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyIssueTitle`] if the issue has no title.
    pub fn from_issue(issue: &Issue) -> Result<Self, TaskDomainError> {
        let mut snapshot = Self::new(issue.title.clone())?
            .with_labels(issue.label_names())
            .with_assignees(issue.assignees.iter().map(|user| user.login.clone()));
        if let Some(body) = issue.body.as_deref().filter(|body| !body.trim().is_empty()) {
            snapshot = snapshot.with_description(body);
        }
        Ok(snapshot)
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets label names.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = String>) -> Self {
        self.labels = labels.into_iter().collect();
        self
    }

    /// Sets assignee logins.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = String>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns label names.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns assignee logins.
    #[must_use]
    pub fn assignees(&self) -> &[String] {
        &self.assignees
    }
}
