//! Pure mappers from GitHub payloads to canonical records.
//!
//! Absent sub-objects become `None` or empty collections; timestamps are
//! copied unchanged.

use super::models::{
    GhBranch, GhComment, GhIssue, GhLabel, GhPullRequest, GhRepository, GhReview, GhUser,
};
use crate::hosting::domain::{
    Branch, Comment, Issue, Label, PullRequest, Repository, Review, User,
};

pub(crate) fn user(raw: GhUser) -> User {
    User {
        login: raw.login,
        id: raw.id,
        name: raw.name,
        email: raw.email,
        avatar_url: raw.avatar_url,
        url: raw.html_url,
    }
}

pub(crate) fn label(raw: GhLabel) -> Label {
    Label {
        name: raw.name,
        color: raw.color,
        description: raw.description,
    }
}

fn users(raw: Option<Vec<GhUser>>) -> Vec<User> {
    raw.unwrap_or_default().into_iter().map(user).collect()
}

fn labels(raw: Option<Vec<GhLabel>>) -> Vec<Label> {
    raw.unwrap_or_default().into_iter().map(label).collect()
}

pub(crate) fn repository(raw: GhRepository) -> Repository {
    let owner = raw.owner.map_or_else(
        || {
            raw.full_name
                .split_once('/')
                .map(|(owner, _)| owner.to_owned())
                .unwrap_or_default()
        },
        |owner| owner.login,
    );
    Repository {
        owner,
        name: raw.name,
        full_name: raw.full_name,
        private: raw.private,
        default_branch: raw.default_branch.unwrap_or_default(),
        clone_url: raw.clone_url,
        url: raw.html_url,
        created_at: raw.created_at,
        updated_at: raw.updated_at,
    }
}

pub(crate) fn issue(raw: GhIssue) -> Issue {
    Issue {
        number: raw.number,
        title: raw.title,
        body: raw.body,
        state: raw.state,
        author: raw.user.map(user),
        assignees: users(raw.assignees),
        labels: labels(raw.labels),
        created_at: raw.created_at,
        updated_at: raw.updated_at,
        closed_at: raw.closed_at,
        comments: raw.comments.unwrap_or_default(),
        url: raw.html_url,
        is_pull_request: raw.pull_request.is_some(),
    }
}

fn branch(raw: GhBranch) -> Branch {
    Branch {
        ref_name: raw.ref_name,
        sha: raw.sha,
        repository: raw.repo.map(repository),
        user: raw.user.map(user),
    }
}

pub(crate) fn pull_request(raw: GhPullRequest) -> PullRequest {
    PullRequest {
        number: raw.number,
        title: raw.title,
        body: raw.body,
        state: raw.state,
        merged: raw.merged.unwrap_or(false),
        merged_at: raw.merged_at,
        author: raw.user.map(user),
        assignees: users(raw.assignees),
        labels: labels(raw.labels),
        head: branch(raw.head),
        base: branch(raw.base),
        draft: raw.draft.unwrap_or(false),
        mergeable: raw.mergeable,
        requested_reviewers: users(raw.requested_reviewers),
        comments: raw.comments.unwrap_or_default(),
        url: raw.html_url,
        created_at: raw.created_at,
        updated_at: raw.updated_at,
        closed_at: raw.closed_at,
    }
}

pub(crate) fn review(raw: GhReview) -> Review {
    Review {
        id: raw.id,
        author: raw.user.map(user),
        body: raw.body,
        state: raw.state,
        submitted_at: raw.submitted_at,
        commit_id: raw.commit_id,
        url: raw.html_url,
    }
}

pub(crate) fn comment(raw: GhComment) -> Comment {
    Comment {
        id: raw.id,
        author: raw.user.map(user),
        body: raw.body.unwrap_or_default(),
        created_at: raw.created_at,
        updated_at: raw.updated_at,
        url: raw.html_url,
    }
}
