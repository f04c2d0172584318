//! Commit summaries read from a workspace's history.

use serde::Serialize;

/// One line of `git log --format=%H %s`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitSummary {
    /// Full commit hash.
    pub sha: String,
    /// First line of the commit message.
    pub subject: String,
}

impl CommitSummary {
    /// Parses a `<sha> <subject>` log line; blank lines yield `None`.
    #[must_use]
    pub fn parse_log_line(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        let (sha, subject) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
        Some(Self {
            sha: sha.to_owned(),
            subject: subject.to_owned(),
        })
    }
}
