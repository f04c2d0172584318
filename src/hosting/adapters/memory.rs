//! In-process hosting platform for tests and offline runs.
//!
//! Numbers are assigned per repository from one counter shared by issues and
//! pull requests, and every pull request is mirrored as an issue flagged with
//! [`Issue::is_pull_request`], as GitHub does.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::hosting::{
    domain::{
        Branch, Comment, CreateIssue, CreatePullRequest, HostingPlatform, Issue, Label,
        ListOptions, PullRequest, Repository, RepositoryFullName, Review, SortDirection,
        StateFilter, UpdateIssue, UpdatePullRequest, User,
    },
    ports::{HostingError, HostingProvider, HostingResult},
};

const OPEN: &str = "open";
const CLOSED: &str = "closed";

/// Thread-safe in-memory hosting provider.
#[derive(Clone)]
pub struct InMemoryHostingProvider {
    platform: HostingPlatform,
    clock: Arc<dyn Clock + Send + Sync>,
    state: Arc<RwLock<HostingState>>,
}

#[derive(Debug, Default)]
struct HostingState {
    current_user: Option<User>,
    repositories: HashMap<RepositoryFullName, RepositoryState>,
    next_comment_id: u64,
    failing_comments: bool,
}

#[derive(Debug)]
struct RepositoryState {
    repository: Repository,
    next_number: u64,
    issues: BTreeMap<u64, Issue>,
    pull_requests: BTreeMap<u64, PullRequest>,
    comments: HashMap<u64, Vec<Comment>>,
    reviews: HashMap<u64, Vec<Review>>,
    labels: Vec<Label>,
}

impl std::fmt::Debug for InMemoryHostingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryHostingProvider")
            .field("platform", &self.platform)
            .finish_non_exhaustive()
    }
}

impl Default for InMemoryHostingProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHostingProvider {
    /// Creates an empty GitHub-flavoured platform using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(DefaultClock)
    }

    /// Creates an empty platform stamping records with `clock`.
    #[must_use]
    pub fn with_clock(clock: impl Clock + Send + Sync + 'static) -> Self {
        Self {
            platform: HostingPlatform::GitHub,
            clock: Arc::new(clock),
            state: Arc::new(RwLock::new(HostingState {
                next_comment_id: 1,
                ..HostingState::default()
            })),
        }
    }

    /// Sets the identity returned by [`HostingProvider::current_user`].
    ///
    /// # Errors
    ///
    /// Returns [`HostingError::Transport`] when the state lock is poisoned.
    pub fn set_current_user(&self, login: &str) -> HostingResult<User> {
        let user = User::new(login, 1);
        self.write()?.current_user = Some(user.clone());
        Ok(user)
    }

    /// Registers a repository.
    ///
    /// # Errors
    ///
    /// Returns [`HostingError::Unprocessable`] when the repository already
    /// exists.
    pub fn add_repository(
        &self,
        repo: &RepositoryFullName,
        default_branch: &str,
    ) -> HostingResult<Repository> {
        let now = self.clock.utc();
        let repository = Repository {
            owner: repo.owner().to_owned(),
            name: repo.name().to_owned(),
            full_name: repo.to_string(),
            private: false,
            default_branch: default_branch.to_owned(),
            clone_url: Some(format!("https://github.com/{repo}.git")),
            url: Some(format!("https://github.com/{repo}")),
            created_at: Some(now),
            updated_at: Some(now),
        };
        let mut state = self.write()?;
        if state.repositories.contains_key(repo) {
            return Err(HostingError::Unprocessable(format!(
                "repository {repo} already exists"
            )));
        }
        state.repositories.insert(
            repo.clone(),
            RepositoryState {
                repository: repository.clone(),
                next_number: 1,
                issues: BTreeMap::new(),
                pull_requests: BTreeMap::new(),
                comments: HashMap::new(),
                reviews: HashMap::new(),
                labels: Vec::new(),
            },
        );
        Ok(repository)
    }

    /// Records a comment with caller-chosen timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`HostingError::NotFound`] when the repository or issue does
    /// not exist.
    pub fn add_comment(
        &self,
        repo: &RepositoryFullName,
        issue_number: u64,
        comment: Comment,
    ) -> HostingResult<()> {
        let mut state = self.write()?;
        let entry = repository_mut(&mut state, repo)?;
        let issue = entry
            .issues
            .get_mut(&issue_number)
            .ok_or_else(|| issue_not_found(repo, issue_number))?;
        issue.comments = issue.comments.saturating_add(1);
        entry.comments.entry(issue_number).or_default().push(comment);
        Ok(())
    }

    /// Records a review on a pull request.
    ///
    /// # Errors
    ///
    /// Returns [`HostingError::NotFound`] when the pull request does not
    /// exist.
    pub fn add_review(
        &self,
        repo: &RepositoryFullName,
        pull_request: u64,
        review: Review,
    ) -> HostingResult<()> {
        let mut state = self.write()?;
        let entry = repository_mut(&mut state, repo)?;
        if !entry.pull_requests.contains_key(&pull_request) {
            return Err(pull_request_not_found(repo, pull_request));
        }
        entry.reviews.entry(pull_request).or_default().push(review);
        Ok(())
    }

    /// Marks a pull request merged and closed.
    ///
    /// # Errors
    ///
    /// Returns [`HostingError::NotFound`] when the pull request does not
    /// exist.
    pub fn merge_pull_request(
        &self,
        repo: &RepositoryFullName,
        number: u64,
    ) -> HostingResult<PullRequest> {
        let now = self.clock.utc();
        let mut state = self.write()?;
        let entry = repository_mut(&mut state, repo)?;
        let pull_request = entry
            .pull_requests
            .get_mut(&number)
            .ok_or_else(|| pull_request_not_found(repo, number))?;
        pull_request.merged = true;
        pull_request.merged_at = Some(now);
        pull_request.state = CLOSED.to_owned();
        pull_request.closed_at = Some(now);
        pull_request.updated_at = now;
        let merged = pull_request.clone();
        if let Some(mirror) = entry.issues.get_mut(&number) {
            mirror.state = CLOSED.to_owned();
            mirror.closed_at = Some(now);
            mirror.updated_at = now;
        }
        Ok(merged)
    }

    /// Makes every subsequent [`HostingProvider::create_comment`] call fail.
    ///
    /// # Errors
    ///
    /// Returns [`HostingError::Transport`] when the state lock is poisoned.
    pub fn fail_comments(&self, failing: bool) -> HostingResult<()> {
        self.write()?.failing_comments = failing;
        Ok(())
    }

    fn read(&self) -> HostingResult<RwLockReadGuard<'_, HostingState>> {
        self.state
            .read()
            .map_err(|err| HostingError::transport(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> HostingResult<RwLockWriteGuard<'_, HostingState>> {
        self.state
            .write()
            .map_err(|err| HostingError::transport(std::io::Error::other(err.to_string())))
    }
}

fn repository_not_found(repo: &RepositoryFullName) -> HostingError {
    HostingError::NotFound(format!("repository {repo}"))
}

fn issue_not_found(repo: &RepositoryFullName, number: u64) -> HostingError {
    HostingError::NotFound(format!("issue {repo}#{number}"))
}

fn pull_request_not_found(repo: &RepositoryFullName, number: u64) -> HostingError {
    HostingError::NotFound(format!("pull request {repo}#{number}"))
}

fn repository_ref<'a>(
    state: &'a HostingState,
    repo: &RepositoryFullName,
) -> HostingResult<&'a RepositoryState> {
    state
        .repositories
        .get(repo)
        .ok_or_else(|| repository_not_found(repo))
}

fn repository_mut<'a>(
    state: &'a mut HostingState,
    repo: &RepositoryFullName,
) -> HostingResult<&'a mut RepositoryState> {
    state
        .repositories
        .get_mut(repo)
        .ok_or_else(|| repository_not_found(repo))
}

fn matches_state(state: &str, filter: StateFilter) -> bool {
    match filter {
        StateFilter::Open => state == OPEN,
        StateFilter::Closed => state == CLOSED,
        StateFilter::All => true,
    }
}

/// Orders by number in the requested direction and slices out one page.
fn paginate<T>(mut items: Vec<T>, options: &ListOptions, number: impl Fn(&T) -> u64) -> Vec<T> {
    items.sort_by_key(&number);
    if options.direction == SortDirection::Desc {
        items.reverse();
    }
    page_slice(items, options)
}

fn page_slice<T>(items: Vec<T>, options: &ListOptions) -> Vec<T> {
    let per_page = usize::try_from(options.per_page.max(1)).unwrap_or(usize::MAX);
    let page_index = usize::try_from(options.page.saturating_sub(1)).unwrap_or(usize::MAX);
    items
        .into_iter()
        .skip(page_index.saturating_mul(per_page))
        .take(per_page)
        .collect()
}

fn remember_labels(entry: &mut RepositoryState, names: &[String]) -> Vec<Label> {
    names
        .iter()
        .map(|name| {
            if !entry.labels.iter().any(|label| &label.name == name) {
                entry.labels.push(Label::named(name.clone()));
            }
            Label::named(name.clone())
        })
        .collect()
}

fn users(logins: &[String]) -> Vec<User> {
    logins.iter().map(|login| User::new(login.clone(), 0)).collect()
}

fn apply_state(
    state: &mut String,
    closed_at: &mut Option<chrono::DateTime<chrono::Utc>>,
    requested: Option<&str>,
    now: chrono::DateTime<chrono::Utc>,
) {
    if let Some(next) = requested {
        *closed_at = (next == CLOSED).then_some(now);
        next.clone_into(state);
    }
}

#[async_trait]
impl HostingProvider for InMemoryHostingProvider {
    fn platform(&self) -> HostingPlatform {
        self.platform
    }

    async fn current_user(&self) -> HostingResult<User> {
        self.read()?
            .current_user
            .clone()
            .ok_or_else(|| HostingError::Unauthorized("no authenticated user".to_owned()))
    }

    async fn get_repository(&self, repo: &RepositoryFullName) -> HostingResult<Repository> {
        let state = self.read()?;
        Ok(repository_ref(&state, repo)?.repository.clone())
    }

    async fn list_issues(
        &self,
        repo: &RepositoryFullName,
        options: &ListOptions,
    ) -> HostingResult<Vec<Issue>> {
        let state = self.read()?;
        let entry = repository_ref(&state, repo)?;
        let matching = entry
            .issues
            .values()
            .filter(|issue| matches_state(&issue.state, options.state))
            .filter(|issue| {
                options
                    .assignee
                    .as_deref()
                    .is_none_or(|login| issue.is_assigned_to(login))
            })
            .filter(|issue| options.since.is_none_or(|since| issue.updated_at >= since))
            .cloned()
            .collect();
        Ok(paginate(matching, options, |issue| issue.number))
    }

    async fn get_issue(&self, repo: &RepositoryFullName, number: u64) -> HostingResult<Issue> {
        let state = self.read()?;
        repository_ref(&state, repo)?
            .issues
            .get(&number)
            .cloned()
            .ok_or_else(|| issue_not_found(repo, number))
    }

    async fn create_issue(
        &self,
        repo: &RepositoryFullName,
        request: &CreateIssue,
    ) -> HostingResult<Issue> {
        if request.title.trim().is_empty() {
            return Err(HostingError::Validation(
                "issue title must not be empty".to_owned(),
            ));
        }
        let now = self.clock.utc();
        let mut state = self.write()?;
        let author = state.current_user.clone();
        let entry = repository_mut(&mut state, repo)?;
        let number = entry.next_number;
        entry.next_number = number.saturating_add(1);
        let labels = remember_labels(entry, &request.labels);
        let issue = Issue {
            number,
            title: request.title.clone(),
            body: request.body.clone(),
            state: OPEN.to_owned(),
            author,
            assignees: users(&request.assignees),
            labels,
            created_at: now,
            updated_at: now,
            closed_at: None,
            comments: 0,
            url: format!("https://github.com/{repo}/issues/{number}"),
            is_pull_request: false,
        };
        entry.issues.insert(number, issue.clone());
        Ok(issue)
    }

    async fn update_issue(
        &self,
        repo: &RepositoryFullName,
        number: u64,
        request: &UpdateIssue,
    ) -> HostingResult<Issue> {
        let now = self.clock.utc();
        let mut state = self.write()?;
        let entry = repository_mut(&mut state, repo)?;
        let labels = request
            .labels
            .as_deref()
            .map(|names| remember_labels(entry, names));
        let issue = entry
            .issues
            .get_mut(&number)
            .ok_or_else(|| issue_not_found(repo, number))?;
        if let Some(title) = &request.title {
            title.clone_into(&mut issue.title);
        }
        if let Some(body) = &request.body {
            issue.body = Some(body.clone());
        }
        apply_state(
            &mut issue.state,
            &mut issue.closed_at,
            request.state.as_deref(),
            now,
        );
        if let Some(replacement) = labels {
            issue.labels = replacement;
        }
        if let Some(assignees) = &request.assignees {
            issue.assignees = users(assignees);
        }
        issue.updated_at = now;
        Ok(issue.clone())
    }

    async fn list_pull_requests(
        &self,
        repo: &RepositoryFullName,
        options: &ListOptions,
    ) -> HostingResult<Vec<PullRequest>> {
        let state = self.read()?;
        let entry = repository_ref(&state, repo)?;
        let matching = entry
            .pull_requests
            .values()
            .filter(|pull_request| matches_state(&pull_request.state, options.state))
            .filter(|pull_request| {
                options
                    .head
                    .as_deref()
                    .is_none_or(|head| pull_request.head.ref_name == head)
            })
            .cloned()
            .collect();
        Ok(paginate(matching, options, |pull_request| pull_request.number))
    }

    async fn get_pull_request(
        &self,
        repo: &RepositoryFullName,
        number: u64,
    ) -> HostingResult<PullRequest> {
        let state = self.read()?;
        repository_ref(&state, repo)?
            .pull_requests
            .get(&number)
            .cloned()
            .ok_or_else(|| pull_request_not_found(repo, number))
    }

    async fn create_pull_request(
        &self,
        repo: &RepositoryFullName,
        request: &CreatePullRequest,
    ) -> HostingResult<PullRequest> {
        if request.title.trim().is_empty() || request.head.trim().is_empty() {
            return Err(HostingError::Validation(
                "pull request title and head branch must not be empty".to_owned(),
            ));
        }
        let now = self.clock.utc();
        let mut state = self.write()?;
        let author = state.current_user.clone();
        let entry = repository_mut(&mut state, repo)?;
        let duplicate = entry.pull_requests.values().any(|existing| {
            existing.state == OPEN && existing.head.ref_name == request.head
        });
        if duplicate {
            return Err(HostingError::Unprocessable(format!(
                "A pull request already exists for {}:{}",
                repo.owner(),
                request.head
            )));
        }

        let number = entry.next_number;
        entry.next_number = number.saturating_add(1);
        let url = format!("https://github.com/{repo}/pull/{number}");
        let branch = |ref_name: &str| Branch {
            ref_name: ref_name.to_owned(),
            sha: String::new(),
            repository: Some(entry.repository.clone()),
            user: None,
        };
        let pull_request = PullRequest {
            number,
            title: request.title.clone(),
            body: request.body.clone(),
            state: OPEN.to_owned(),
            merged: false,
            merged_at: None,
            author: author.clone(),
            assignees: Vec::new(),
            labels: Vec::new(),
            head: branch(&request.head),
            base: branch(&request.base),
            draft: request.draft,
            mergeable: None,
            requested_reviewers: Vec::new(),
            comments: 0,
            url: url.clone(),
            created_at: now,
            updated_at: now,
            closed_at: None,
        };
        let mirror = Issue {
            number,
            title: request.title.clone(),
            body: request.body.clone(),
            state: OPEN.to_owned(),
            author,
            assignees: Vec::new(),
            labels: Vec::new(),
            created_at: now,
            updated_at: now,
            closed_at: None,
            comments: 0,
            url,
            is_pull_request: true,
        };
        entry.pull_requests.insert(number, pull_request.clone());
        entry.issues.insert(number, mirror);
        Ok(pull_request)
    }

    async fn update_pull_request(
        &self,
        repo: &RepositoryFullName,
        number: u64,
        request: &UpdatePullRequest,
    ) -> HostingResult<PullRequest> {
        let now = self.clock.utc();
        let mut state = self.write()?;
        let entry = repository_mut(&mut state, repo)?;
        let pull_request = entry
            .pull_requests
            .get_mut(&number)
            .ok_or_else(|| pull_request_not_found(repo, number))?;
        if let Some(title) = &request.title {
            title.clone_into(&mut pull_request.title);
        }
        if let Some(body) = &request.body {
            pull_request.body = Some(body.clone());
        }
        if let Some(base) = &request.base {
            base.clone_into(&mut pull_request.base.ref_name);
        }
        apply_state(
            &mut pull_request.state,
            &mut pull_request.closed_at,
            request.state.as_deref(),
            now,
        );
        pull_request.updated_at = now;
        Ok(pull_request.clone())
    }

    async fn list_reviews(
        &self,
        repo: &RepositoryFullName,
        pull_request: u64,
        options: &ListOptions,
    ) -> HostingResult<Vec<Review>> {
        let state = self.read()?;
        let entry = repository_ref(&state, repo)?;
        if !entry.pull_requests.contains_key(&pull_request) {
            return Err(pull_request_not_found(repo, pull_request));
        }
        let reviews = entry.reviews.get(&pull_request).cloned().unwrap_or_default();
        Ok(paginate(reviews, options, |review| review.id))
    }

    async fn list_comments(
        &self,
        repo: &RepositoryFullName,
        issue_number: u64,
        options: &ListOptions,
    ) -> HostingResult<Vec<Comment>> {
        let state = self.read()?;
        let entry = repository_ref(&state, repo)?;
        if !entry.issues.contains_key(&issue_number) {
            return Err(issue_not_found(repo, issue_number));
        }
        let comments = entry
            .comments
            .get(&issue_number)
            .map(|comments| {
                comments
                    .iter()
                    .filter(|comment| options.since.is_none_or(|since| comment.updated_at >= since))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(paginate(comments, options, |comment| comment.id))
    }

    async fn create_comment(
        &self,
        repo: &RepositoryFullName,
        issue_number: u64,
        body: &str,
    ) -> HostingResult<Comment> {
        if body.trim().is_empty() {
            return Err(HostingError::Validation(
                "comment body must not be empty".to_owned(),
            ));
        }
        let now = self.clock.utc();
        let mut state = self.write()?;
        if state.failing_comments {
            return Err(HostingError::Api {
                status: 502,
                message: "502 Bad Gateway".to_owned(),
            });
        }
        let id = state.next_comment_id;
        state.next_comment_id = id.saturating_add(1);
        let author = state.current_user.clone();
        let comment = Comment {
            id,
            author,
            body: body.to_owned(),
            created_at: now,
            updated_at: now,
            url: Some(format!(
                "https://github.com/{repo}/issues/{issue_number}#issuecomment-{id}"
            )),
        };
        let entry = repository_mut(&mut state, repo)?;
        let issue = entry
            .issues
            .get_mut(&issue_number)
            .ok_or_else(|| issue_not_found(repo, issue_number))?;
        issue.comments = issue.comments.saturating_add(1);
        entry
            .comments
            .entry(issue_number)
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }

    async fn list_labels(
        &self,
        repo: &RepositoryFullName,
        options: &ListOptions,
    ) -> HostingResult<Vec<Label>> {
        let state = self.read()?;
        let labels = repository_ref(&state, repo)?.labels.clone();
        Ok(page_slice(labels, options))
    }
}
