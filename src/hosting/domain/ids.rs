//! Platform and repository identity types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Supported Git-hosting platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostingPlatform {
    /// GitHub and GitHub Enterprise.
    #[serde(rename = "github")]
    GitHub,
    /// GitLab.
    #[serde(rename = "gitlab")]
    GitLab,
    /// Bitbucket.
    #[serde(rename = "bitbucket")]
    Bitbucket,
}

impl HostingPlatform {
    /// Returns the platform name in canonical storage format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
            Self::Bitbucket => "bitbucket",
        }
    }

    /// Returns the public web host used when none is configured.
    #[must_use]
    pub const fn default_host(self) -> &'static str {
        match self {
            Self::GitHub => "github.com",
            Self::GitLab => "gitlab.com",
            Self::Bitbucket => "bitbucket.org",
        }
    }
}

impl TryFrom<&str> for HostingPlatform {
    type Error = ParsePlatformError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "github" => Ok(Self::GitHub),
            "gitlab" => Ok(Self::GitLab),
            "bitbucket" => Ok(Self::Bitbucket),
            _ => Err(ParsePlatformError(value.to_owned())),
        }
    }
}

impl fmt::Display for HostingPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned for an unknown platform name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported hosting platform: {0}")]
pub struct ParsePlatformError(pub String);

/// Error returned for a malformed `owner/repo` identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid repository name '{0}', expected owner/repo")]
pub struct RepositoryNameError(pub String);

/// Normalized remote repository identifier in `owner/repo` format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepositoryFullName {
    owner: String,
    name: String,
}

impl RepositoryFullName {
    /// Creates a validated repository name.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryNameError`] if the value does not contain exactly
    /// one slash-delimited owner and repository segment.
    pub fn new(value: impl Into<String>) -> Result<Self, RepositoryNameError> {
        let raw = value.into();
        let normalized = raw.trim();
        let mut segments = normalized.split('/');
        let owner = segments.next().unwrap_or_default();
        let repo = segments.next().unwrap_or_default();
        let has_more_segments = segments.next().is_some();
        let is_valid = !owner.is_empty()
            && !repo.is_empty()
            && !has_more_segments
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(RepositoryNameError(raw));
        }

        Ok(Self {
            owner: owner.to_owned(),
            name: repo.to_owned(),
        })
    }

    /// Returns the owning user or organization.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name without its owner.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepositoryFullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl TryFrom<String> for RepositoryFullName {
    type Error = RepositoryNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RepositoryFullName> for String {
    fn from(value: RepositoryFullName) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{HostingPlatform, RepositoryFullName};
    use rstest::rstest;

    #[rstest]
    #[case("owner/repo", "owner", "repo")]
    #[case("  acme/widgets ", "acme", "widgets")]
    fn repository_name_splits_owner_and_name(
        #[case] raw: &str,
        #[case] owner: &str,
        #[case] name: &str,
    ) {
        let repo = RepositoryFullName::new(raw).expect("valid repository");
        assert_eq!(repo.owner(), owner);
        assert_eq!(repo.name(), name);
        assert_eq!(repo.to_string(), format!("{owner}/{name}"));
    }

    #[rstest]
    #[case("")]
    #[case("owner")]
    #[case("owner/")]
    #[case("/repo")]
    #[case("a/b/c")]
    #[case("own er/repo")]
    fn repository_name_rejects_malformed_values(#[case] raw: &str) {
        assert!(RepositoryFullName::new(raw).is_err());
    }

    #[rstest]
    #[case("github", HostingPlatform::GitHub)]
    #[case(" GitLab ", HostingPlatform::GitLab)]
    #[case("BITBUCKET", HostingPlatform::Bitbucket)]
    fn platform_parses_case_insensitively(#[case] raw: &str, #[case] expected: HostingPlatform) {
        assert_eq!(HostingPlatform::try_from(raw), Ok(expected));
    }

    #[rstest]
    fn platform_rejects_unknown_names() {
        assert!(HostingPlatform::try_from("gitea").is_err());
    }
}
