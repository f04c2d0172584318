//! Canonical hosting records shared by every provider.
//!
//! Records are read-only mirrors of remote data. State fields hold the
//! platform's literal vocabulary; no normalization happens here.

mod ids;
mod options;
mod records;

pub use ids::{HostingPlatform, ParsePlatformError, RepositoryFullName, RepositoryNameError};
pub use options::{
    CreateIssue, CreatePullRequest, ListOptions, SortDirection, StateFilter, UpdateIssue,
    UpdatePullRequest,
};
pub use records::{Branch, Comment, Issue, Label, PullRequest, Repository, Review, User};
