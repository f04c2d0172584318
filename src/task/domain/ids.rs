//! Identifier and validated scalar types for the task domain.

use super::TaskDomainError;
use crate::hosting::domain::{HostingPlatform, RepositoryFullName};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a local task record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new random task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a task identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Positive, platform-scoped issue number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Creates a validated issue number.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidIssueNumber`] when the value is zero.
    pub const fn new(value: u64) -> Result<Self, TaskDomainError> {
        if value == 0 {
            return Err(TaskDomainError::InvalidIssueNumber(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for IssueNumber {
    type Error = TaskDomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IssueNumber> for u64 {
    fn from(value: IssueNumber) -> Self {
        value.0
    }
}

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Correlation key between a remote issue and its local task.
///
/// Renders as `<platform>:<owner>/<repo>#<number>`, for example
/// `github:acme/widgets#42`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketId {
    platform: HostingPlatform,
    repository: RepositoryFullName,
    issue_number: IssueNumber,
}

impl TicketId {
    /// Creates a ticket identifier from validated components.
    #[must_use]
    pub const fn new(
        platform: HostingPlatform,
        repository: RepositoryFullName,
        issue_number: IssueNumber,
    ) -> Self {
        Self {
            platform,
            repository,
            issue_number,
        }
    }

    /// Creates a ticket identifier from raw values.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskDomainError`] when any component is invalid.
    pub fn from_parts(
        platform: &str,
        repository: &str,
        issue_number: u64,
    ) -> Result<Self, TaskDomainError> {
        Ok(Self::new(
            HostingPlatform::try_from(platform)?,
            RepositoryFullName::new(repository)?,
            IssueNumber::new(issue_number)?,
        ))
    }

    /// Parses the rendered form produced by [`fmt::Display`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTicketId`] when the shape is wrong,
    /// or the component error when a part is invalid.
    pub fn parse(value: &str) -> Result<Self, TaskDomainError> {
        let invalid = || TaskDomainError::InvalidTicketId(value.to_owned());
        let (platform, rest) = value.trim().split_once(':').ok_or_else(invalid)?;
        let (repository, number) = rest.rsplit_once('#').ok_or_else(invalid)?;
        let issue_number = number.parse::<u64>().map_err(|_| invalid())?;
        Self::from_parts(platform, repository, issue_number)
    }

    /// Returns the hosting platform.
    #[must_use]
    pub const fn platform(&self) -> HostingPlatform {
        self.platform
    }

    /// Returns the repository identifier.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryFullName {
        &self.repository
    }

    /// Returns the issue number.
    #[must_use]
    pub const fn issue_number(&self) -> IssueNumber {
        self.issue_number
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}#{}",
            self.platform, self.repository, self.issue_number
        )
    }
}

impl TryFrom<String> for TicketId {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TicketId> for String {
    fn from(value: TicketId) -> Self {
        value.to_string()
    }
}
