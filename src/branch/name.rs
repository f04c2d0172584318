//! Validated git branch name value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum length for a validated branch name.
const MAX_BRANCH_NAME_LENGTH: usize = 200;

/// Characters git forbids anywhere in a ref name.
const FORBIDDEN_CHARACTERS: [char; 7] = ['~', '^', ':', '?', '*', '[', '\\'];

/// Error returned when a branch name is not a legal git ref segment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid branch name '{0}'")]
pub struct BranchNameError(pub String);

/// Validated git branch name.
///
/// Branch names must be non-empty after trimming, must not exceed
/// `MAX_BRANCH_NAME_LENGTH` characters, and must satisfy the subset of
/// `git check-ref-format` rules that matter for single-branch refs.
///
/// # Examples
///
///     use tasksync::branch::BranchName;
///
///     let name = BranchName::new("task/fix-login-bug").expect("valid");
///     assert_eq!(name.as_str(), "task/fix-login-bug");
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Creates a validated branch name.
    ///
    /// # Errors
    ///
    /// Returns [`BranchNameError`] when the value is empty, too long, or not
    /// a legal git ref.
    pub fn new(value: impl Into<String>) -> Result<Self, BranchNameError> {
        let raw = value.into();
        let normalized = raw.trim();

        if !is_legal_ref(normalized) {
            return Err(BranchNameError(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Wraps a name produced by the deriver, whose output is legal by
    /// construction.
    pub(super) const fn from_derived(value: String) -> Self {
        Self(value)
    }

    /// Returns the branch name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_legal_ref(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_BRANCH_NAME_LENGTH {
        return false;
    }
    let has_bad_char = name
        .chars()
        .any(|ch| ch.is_whitespace() || ch.is_control() || FORBIDDEN_CHARACTERS.contains(&ch));
    let has_bad_sequence = name.contains("..") || name.contains("@{") || name.contains("//");
    let has_bad_edge = name.starts_with('-')
        || name.starts_with('/')
        || name.starts_with('.')
        || name.ends_with('/')
        || name.ends_with('.')
        || name.ends_with(".lock")
        || name == "@";
    let has_hidden_component = name.split('/').any(|part| part.starts_with('.'));

    !(has_bad_char || has_bad_sequence || has_bad_edge || has_hidden_component)
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for BranchName {
    type Error = BranchNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BranchName> for String {
    fn from(value: BranchName) -> Self {
        value.0
    }
}
