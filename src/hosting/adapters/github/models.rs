//! GitHub REST payload shapes.
//!
//! Every sub-object GitHub may omit or null out is optional here; the
//! conversion layer decides what the canonical record receives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GhUser {
    pub(crate) login: String,
    #[serde(default)]
    pub(crate) id: u64,
    pub(crate) name: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) avatar_url: Option<String>,
    pub(crate) html_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GhLabel {
    pub(crate) name: String,
    pub(crate) color: Option<String>,
    pub(crate) description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GhRepository {
    pub(crate) name: String,
    pub(crate) full_name: String,
    pub(crate) owner: Option<GhUser>,
    #[serde(default)]
    pub(crate) private: bool,
    pub(crate) default_branch: Option<String>,
    pub(crate) clone_url: Option<String>,
    pub(crate) html_url: Option<String>,
    pub(crate) created_at: Option<DateTime<Utc>>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GhIssue {
    pub(crate) number: u64,
    pub(crate) title: String,
    pub(crate) body: Option<String>,
    pub(crate) state: String,
    pub(crate) user: Option<GhUser>,
    pub(crate) assignees: Option<Vec<GhUser>>,
    pub(crate) labels: Option<Vec<GhLabel>>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) closed_at: Option<DateTime<Utc>>,
    pub(crate) comments: Option<u64>,
    #[serde(default)]
    pub(crate) html_url: String,
    /// Present only when the issue is a pull request.
    pub(crate) pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GhBranch {
    #[serde(rename = "ref")]
    pub(crate) ref_name: String,
    #[serde(default)]
    pub(crate) sha: String,
    pub(crate) repo: Option<GhRepository>,
    pub(crate) user: Option<GhUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GhPullRequest {
    pub(crate) number: u64,
    pub(crate) title: String,
    pub(crate) body: Option<String>,
    pub(crate) state: String,
    pub(crate) merged: Option<bool>,
    pub(crate) merged_at: Option<DateTime<Utc>>,
    pub(crate) user: Option<GhUser>,
    pub(crate) assignees: Option<Vec<GhUser>>,
    pub(crate) labels: Option<Vec<GhLabel>>,
    pub(crate) head: GhBranch,
    pub(crate) base: GhBranch,
    pub(crate) draft: Option<bool>,
    pub(crate) mergeable: Option<bool>,
    pub(crate) requested_reviewers: Option<Vec<GhUser>>,
    pub(crate) comments: Option<u64>,
    #[serde(default)]
    pub(crate) html_url: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) closed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GhReview {
    pub(crate) id: u64,
    pub(crate) user: Option<GhUser>,
    pub(crate) body: Option<String>,
    pub(crate) state: String,
    pub(crate) submitted_at: Option<DateTime<Utc>>,
    pub(crate) commit_id: Option<String>,
    pub(crate) html_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GhComment {
    pub(crate) id: u64,
    pub(crate) user: Option<GhUser>,
    pub(crate) body: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) html_url: Option<String>,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GhErrorBody {
    #[serde(default)]
    pub(crate) message: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct GhCreateIssue<'a> {
    pub(crate) title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) body: Option<&'a str>,
    #[serde(skip_serializing_if = "is_empty_slice")]
    pub(crate) labels: &'a [String],
    #[serde(skip_serializing_if = "is_empty_slice")]
    pub(crate) assignees: &'a [String],
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct GhUpdateIssue<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) body: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) state: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) labels: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) assignees: Option<&'a [String]>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct GhCreatePullRequest<'a> {
    pub(crate) title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) body: Option<&'a str>,
    pub(crate) head: &'a str,
    pub(crate) base: &'a str,
    pub(crate) draft: bool,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct GhUpdatePullRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) body: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) state: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) base: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct GhCreateComment<'a> {
    pub(crate) body: &'a str,
}

/// `skip_serializing_if` predicate; serde passes a reference to the field.
fn is_empty_slice(values: &&[String]) -> bool {
    values.is_empty()
}
