//! Orchestration of discovery, provisioning, publishing and reconciliation.

use super::{
    DiscoveredTask, MaterializedTask, PublishOutcome, PullRequestUpdates, ReconcileReport,
    SyncError, SyncResult,
    templates::{self, LINK_BACK, PULL_REQUEST},
};
use crate::config::SyncConfig;
use crate::context::OperationContext;
use crate::hosting::{
    domain::{CreatePullRequest, Issue, ListOptions, PullRequest, RepositoryFullName, UpdateIssue},
    ports::{HostingError, HostingProvider, HostingResult},
};
use crate::task::{
    domain::{
        IssueNumber, IssueSnapshot, Task, TaskDomainError, TaskId, TaskStatus, TicketId,
        WorkspaceAttachment, WorkspaceLink,
    },
    ports::TaskRepository,
    services::TaskLifecycleService,
};
use crate::workspace::{
    domain::{NewWorkspace, Workspace, WorkspaceRequest},
    ports::{GitRunner, WorkspaceRepository},
    services::{WorkspaceProvisioner, discard},
};
use chrono::{DateTime, Utc};
use minijinja::context;
use mockable::Clock;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

const DISCOVERY_PAGE_SIZE: u32 = 100;
const UPDATES_PAGE_SIZE: u32 = 100;

/// Synchronizes remote issues with local tasks and workspaces.
pub struct TaskSyncService<T, W, G, C>
where
    T: TaskRepository,
    W: WorkspaceRepository,
    G: GitRunner,
    C: Clock + Send + Sync,
{
    hosting: Arc<dyn HostingProvider>,
    tasks: TaskLifecycleService<T, C>,
    workspaces: Arc<W>,
    provisioner: WorkspaceProvisioner<G>,
    clock: Arc<C>,
    config: SyncConfig,
}

impl<T, W, G, C> TaskSyncService<T, W, G, C>
where
    T: TaskRepository,
    W: WorkspaceRepository,
    G: GitRunner,
    C: Clock + Send + Sync,
{
    /// Creates an engine after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Config`] when the configuration is invalid.
    pub fn new(
        hosting: Arc<dyn HostingProvider>,
        task_repository: Arc<T>,
        workspaces: Arc<W>,
        git: Arc<G>,
        clock: Arc<C>,
        config: SyncConfig,
    ) -> SyncResult<Self> {
        config.validate()?;
        Ok(Self {
            hosting,
            tasks: TaskLifecycleService::new(task_repository, Arc::clone(&clock)),
            workspaces,
            provisioner: WorkspaceProvisioner::new(git),
            clock,
            config,
        })
    }

    /// Returns the configuration in use.
    #[must_use]
    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Creates or returns a task for every open issue in `repo` assigned to
    /// the authenticated user. Pull requests and issues not assigned to the
    /// user are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] when the platform or task store fails.
    pub async fn discover(
        &self,
        ctx: &OperationContext,
        repo: &RepositoryFullName,
    ) -> SyncResult<Vec<DiscoveredTask>> {
        let user = self.remote(ctx, self.hosting.current_user()).await?;
        let mut discovered = Vec::new();
        let mut page = 1;
        loop {
            let options = ListOptions::open()
                .with_assignee(&user.login)
                .with_page(page, DISCOVERY_PAGE_SIZE);
            let issues = self
                .remote(ctx, self.hosting.list_issues(repo, &options))
                .await?;
            for issue in issues
                .iter()
                .filter(|issue| !issue.is_pull_request && issue.is_assigned_to(&user.login))
            {
                discovered.push(self.ensure_task(repo, issue).await?);
            }
            if issues.len() < DISCOVERY_PAGE_SIZE as usize {
                break;
            }
            page = page.saturating_add(1);
        }
        info!(
            repository = %repo,
            login = %user.login,
            found = discovered.len(),
            created = discovered.iter().filter(|entry| entry.created).count(),
            "discovery finished"
        );
        Ok(discovered)
    }

    /// Returns the task tracking `issue`, creating it when absent.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] when the issue cannot form a task or the store
    /// fails.
    pub async fn ensure_task(
        &self,
        repo: &RepositoryFullName,
        issue: &Issue,
    ) -> SyncResult<DiscoveredTask> {
        let ticket_id = self.ticket_for(repo, issue.number)?;
        let snapshot = IssueSnapshot::from_issue(issue)?;
        let (task, created) = self.tasks.create_if_absent(ticket_id, snapshot).await?;
        Ok(DiscoveredTask { task, created })
    }

    /// Provisions the task's workspace and moves the task to
    /// [`TaskStatus::InProgress`].
    ///
    /// The workspace is a clone of `https://<host>/<owner>/<repo>.git` at
    /// `<workspace_root>/<task_id>`, on a branch derived from the issue title
    /// and number, based on the repository's default branch. The task is not
    /// modified when any step fails, and a workspace provisioned before the
    /// failure is removed along with its record, so the call can be retried.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] when the task already has a workspace or cannot
    /// start, or when the platform, provisioning or stores fail.
    pub async fn materialize(
        &self,
        ctx: &OperationContext,
        task_id: TaskId,
    ) -> SyncResult<MaterializedTask> {
        let task = self.tasks.get(task_id).await?;
        if task.workspace().is_some() {
            return Err(TaskDomainError::WorkspaceAlreadyAttached(task_id).into());
        }
        if !task.status().can_transition_to(TaskStatus::InProgress) {
            return Err(SyncError::Validation(format!(
                "task {task_id} cannot start from status {}",
                task.status()
            )));
        }

        let ticket_id = task.ticket_id();
        let repo = ticket_id.repository();
        let number = ticket_id.issue_number().value();
        let issue = self.remote(ctx, self.hosting.get_issue(repo, number)).await?;
        let repository = self.remote(ctx, self.hosting.get_repository(repo)).await?;

        let mut request = WorkspaceRequest::new(&issue.title, self.clone_url(repo))
            .with_base_branch(&repository.default_branch)
            .with_ticket(number.to_string());
        if let Some(auth) = &self.config.git_auth {
            request = request.with_auth(auth.clone());
        }
        if let Some(committer) = &self.config.committer {
            request = request.with_committer(committer.clone());
        }

        let destination = self.config.workspace_root.join(task_id.to_string());
        let provisioned = self
            .provisioner
            .provision(ctx, &request, &destination)
            .await?;

        let workspace = Workspace::new(
            NewWorkspace {
                task_id,
                path: provisioned.path,
                source: provisioned.source.to_string(),
                base_branch: provisioned.base_branch,
                branch: provisioned.branch,
                credential_file: provisioned.credential_file,
            },
            &*self.clock,
        );
        let started = match self.attach(task_id, &workspace).await {
            Ok(started) => started,
            Err(err) => {
                warn!(
                    task_id = %task_id,
                    path = %workspace.path(),
                    error = %err,
                    "rolling back materialized workspace"
                );
                self.abandon(&workspace).await;
                return Err(err);
            }
        };
        info!(
            task_id = %task_id,
            ticket_id = %started.ticket_id(),
            branch = %workspace.branch(),
            path = %workspace.path(),
            "task materialized"
        );
        Ok(MaterializedTask {
            task: started,
            workspace,
        })
    }

    /// Pushes a completed task's branch and opens a pull request that closes
    /// the issue, then comments on the issue with a link to it.
    ///
    /// Publishing twice returns the existing pull request.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Validation`] unless the task is completed and has
    /// a branch and workspace, and [`SyncError::LinkBackFailed`] when the pull
    /// request opened but the comment failed.
    pub async fn publish(
        &self,
        ctx: &OperationContext,
        task_id: TaskId,
    ) -> SyncResult<PublishOutcome> {
        let task = self.tasks.get(task_id).await?;
        if task.status() != TaskStatus::Completed {
            return Err(SyncError::Validation(format!(
                "task {task_id} must be completed before publishing, status is {}",
                task.status()
            )));
        }
        let branch = task
            .branch()
            .ok_or_else(|| SyncError::Validation(format!("task {task_id} has no branch")))?;
        let workspace = task
            .workspace()
            .ok_or_else(|| SyncError::Validation(format!("task {task_id} has no workspace")))?;
        let repo = task.ticket_id().repository();

        match self
            .call(ctx, self.hosting.find_pull_request_by_branch(repo, branch.as_str()))
            .await?
        {
            Ok(existing) => {
                debug!(task_id = %task_id, pull_request = existing.number, "pull request exists");
                return Ok(PublishOutcome::Existing(existing));
            }
            Err(HostingError::NoPullRequestForBranch(_)) => {}
            Err(err) => return Err(err.into()),
        }

        self.provisioner
            .push_branch(ctx, &workspace.path, branch)
            .await?;

        let base = match task.base_branch() {
            Some(base) => base.to_owned(),
            None => {
                self.remote(ctx, self.hosting.get_repository(repo))
                    .await?
                    .default_branch
            }
        };
        let issue_number = task.ticket_id().issue_number().value();
        let body = templates::render(
            PULL_REQUEST,
            &self.config.pull_request_template,
            context! {
                title => task.issue().title(),
                description => task.issue().description().unwrap_or_default(),
                issue_number => issue_number,
                branch => branch.as_str(),
                task_id => task_id.to_string(),
            },
        )?;
        let request = CreatePullRequest {
            title: task.issue().title().to_owned(),
            body: Some(body),
            head: branch.as_str().to_owned(),
            base,
            draft: false,
        };
        let pull_request = self
            .remote(ctx, self.hosting.create_pull_request(repo, &request))
            .await?;
        info!(task_id = %task_id, pull_request = pull_request.number, "pull request opened");

        let comment_body = templates::render(
            LINK_BACK,
            &self.config.link_back_template,
            context! {
                pr_number => pull_request.number,
                pr_url => pull_request.url.as_str(),
                branch => branch.as_str(),
            },
        )?;
        let commented = self
            .scoped(ctx)
            .run(self.hosting.create_comment(repo, issue_number, &comment_body))
            .await
            .map_err(HostingError::transport)
            .and_then(std::convert::identity);
        match commented {
            Ok(comment) => Ok(PublishOutcome::Created {
                pull_request,
                comment,
            }),
            Err(source) => {
                warn!(
                    task_id = %task_id,
                    pull_request = pull_request.number,
                    error = %source,
                    "failed to link pull request from issue"
                );
                Err(SyncError::LinkBackFailed {
                    pull_request: Box::new(pull_request),
                    source,
                })
            }
        }
    }

    /// Returns the pull request, comments created after `since` and reviews
    /// submitted after `since`. Both cut-offs are strict.
    ///
    /// Reviews are listed oldest first with no server-side cut-off, so every
    /// page is read for both lists.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Hosting`] when a platform call fails.
    pub async fn fetch_updates(
        &self,
        ctx: &OperationContext,
        repo: &RepositoryFullName,
        pull_request: u64,
        since: DateTime<Utc>,
    ) -> SyncResult<PullRequestUpdates> {
        let current = self
            .remote(ctx, self.hosting.get_pull_request(repo, pull_request))
            .await?;
        let mut comments = Vec::new();
        let mut reviews = Vec::new();
        let mut page = 1;
        loop {
            let options = ListOptions::default()
                .with_since(since)
                .with_page(page, UPDATES_PAGE_SIZE);
            let batch = self
                .remote(ctx, self.hosting.list_comments(repo, pull_request, &options))
                .await?;
            let exhausted = batch.len() < UPDATES_PAGE_SIZE as usize;
            comments.extend(batch.into_iter().filter(|comment| comment.created_at > since));
            if exhausted {
                break;
            }
            page = page.saturating_add(1);
        }
        page = 1;
        loop {
            let options = ListOptions::default().with_page(page, UPDATES_PAGE_SIZE);
            let batch = self
                .remote(ctx, self.hosting.list_reviews(repo, pull_request, &options))
                .await?;
            let exhausted = batch.len() < UPDATES_PAGE_SIZE as usize;
            reviews.extend(batch.into_iter().filter(|review| {
                review
                    .submitted_at
                    .is_some_and(|submitted| submitted > since)
            }));
            if exhausted {
                break;
            }
            page = page.saturating_add(1);
        }
        debug!(
            repository = %repo,
            pull_request,
            comments = comments.len(),
            reviews = reviews.len(),
            "pull request activity fetched"
        );
        Ok(PullRequestUpdates {
            pull_request: current,
            comments,
            reviews,
        })
    }

    /// Replaces every label carrying the status prefix on the task's issue
    /// with exactly one `<prefix>:<status>` label and returns the resulting
    /// label names.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Hosting`] when a platform call fails.
    pub async fn apply_status_label(
        &self,
        ctx: &OperationContext,
        task: &Task,
    ) -> SyncResult<Vec<String>> {
        let repo = task.ticket_id().repository();
        let number = task.ticket_id().issue_number().value();
        let issue = self.remote(ctx, self.hosting.get_issue(repo, number)).await?;

        let prefix = format!("{}:", self.config.label_prefix);
        let status_label = format!("{prefix}{}", task.status());
        let mut labels: Vec<String> = issue
            .label_names()
            .into_iter()
            .filter(|name| !name.starts_with(&prefix))
            .collect();
        labels.push(status_label);

        let update = UpdateIssue {
            labels: Some(labels),
            ..UpdateIssue::default()
        };
        let updated = self
            .remote(ctx, self.hosting.update_issue(repo, number, &update))
            .await?;
        debug!(task_id = %task.id(), status = %task.status(), "status label applied");
        Ok(updated.label_names())
    }

    /// Applies the status label and, when the task has a pull request,
    /// collects activity newer than `since`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] when the task is unknown or a platform call
    /// fails.
    pub async fn reconcile(
        &self,
        ctx: &OperationContext,
        task_id: TaskId,
        since: DateTime<Utc>,
    ) -> SyncResult<ReconcileReport> {
        let task = self.tasks.get(task_id).await?;
        let labels = self.apply_status_label(ctx, &task).await?;
        let mut updates = None;
        if let Some(pull_request) = self.get_pull_request_for_task(ctx, &task).await? {
            let repo = task.ticket_id().repository();
            updates = Some(
                self.fetch_updates(ctx, repo, pull_request.number, since)
                    .await?,
            );
        }
        info!(
            task_id = %task_id,
            has_pull_request = updates.is_some(),
            "task reconciled"
        );
        Ok(ReconcileReport {
            task,
            labels,
            updates,
        })
    }

    /// Returns the pull request for the task's branch, or `None` when the
    /// task has no branch or no pull request exists for it.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Hosting`] for platform failures other than a
    /// missing pull request.
    pub async fn get_pull_request_for_task(
        &self,
        ctx: &OperationContext,
        task: &Task,
    ) -> SyncResult<Option<PullRequest>> {
        let Some(branch) = task.branch() else {
            return Ok(None);
        };
        let repo = task.ticket_id().repository();
        match self
            .call(ctx, self.hosting.find_pull_request_by_branch(repo, branch.as_str()))
            .await?
        {
            Ok(pull_request) => Ok(Some(pull_request)),
            Err(HostingError::NoPullRequestForBranch(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Returns the task tracking an issue, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] when the issue number is invalid or the store
    /// fails.
    pub async fn find_task_for_issue(
        &self,
        repo: &RepositoryFullName,
        issue_number: u64,
    ) -> SyncResult<Option<Task>> {
        let ticket_id = self.ticket_for(repo, issue_number)?;
        Ok(self.tasks.find_by_ticket_id(&ticket_id).await?)
    }

    /// Returns a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Task`] when the task does not exist.
    pub async fn get_task(&self, task_id: TaskId) -> SyncResult<Task> {
        Ok(self.tasks.get(task_id).await?)
    }

    /// Applies a validated local status change.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Task`] for a forbidden transition or an unknown
    /// task.
    pub async fn update_status(&self, task_id: TaskId, status: TaskStatus) -> SyncResult<Task> {
        Ok(self.tasks.transition(task_id, status).await?)
    }

    async fn attach(&self, task_id: TaskId, workspace: &Workspace) -> SyncResult<Task> {
        self.workspaces.store(workspace).await?;
        let attachment = WorkspaceAttachment {
            link: WorkspaceLink {
                workspace_id: workspace.id(),
                path: workspace.path().to_owned(),
            },
            branch: workspace.branch().clone(),
            source_repository: workspace.source().to_owned(),
            base_branch: workspace.base_branch().map(str::to_owned),
        };
        self.tasks
            .start_in_workspace(task_id, attachment)
            .await
            .map_err(SyncError::from)
    }

    /// Undoes a partially attached workspace so Materialize can be retried.
    async fn abandon(&self, workspace: &Workspace) {
        if let Err(err) = self.workspaces.remove(workspace.id()).await {
            warn!(
                workspace_id = %workspace.id(),
                error = %err,
                "failed to remove workspace record"
            );
        }
        if let Err(err) = discard(workspace.path(), workspace.credential_file()) {
            warn!(path = %workspace.path(), error = %err, "failed to discard workspace");
        }
    }

    fn ticket_for(&self, repo: &RepositoryFullName, number: u64) -> SyncResult<TicketId> {
        Ok(TicketId::new(
            self.hosting.platform(),
            repo.clone(),
            IssueNumber::new(number)?,
        ))
    }

    fn clone_url(&self, repo: &RepositoryFullName) -> String {
        format!(
            "https://{}/{}/{}.git",
            self.config.web_host(),
            repo.owner(),
            repo.name()
        )
    }

    /// Child of `ctx` carrying the configured timeout when the caller set
    /// none.
    fn scoped(&self, ctx: &OperationContext) -> OperationContext {
        let child = ctx.child();
        if ctx.timeout().is_some() {
            child
        } else {
            child.with_timeout(self.config.timeout())
        }
    }

    async fn call<F, R>(&self, ctx: &OperationContext, operation: F) -> SyncResult<HostingResult<R>>
    where
        F: Future<Output = HostingResult<R>>,
    {
        Ok(self.scoped(ctx).run(operation).await?)
    }

    async fn remote<F, R>(&self, ctx: &OperationContext, operation: F) -> SyncResult<R>
    where
        F: Future<Output = HostingResult<R>>,
    {
        Ok(self.call(ctx, operation).await??)
    }
}
