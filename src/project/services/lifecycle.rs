//! Service layer for creating, listing and progressing client projects.

use crate::auth::domain::{AccessDenied, AccessPolicy, Actor};
use crate::directory::{
    domain::{ClientId, User, UserId},
    ports::{DirectoryRepository, DirectoryRepositoryError},
};
use crate::notification::{
    domain::{Notice, NotificationKind},
    ports::NotificationSink,
};
use crate::project::{
    domain::{Progress, Project, ProjectDomainError, ProjectId, ProjectName, ProjectStatus},
    ports::{ProjectFilter, ProjectRepository, ProjectRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Attempts made before a contended update gives up with a conflict.
const MAX_UPDATE_ATTEMPTS: usize = 8;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    client_id: ClientId,
    name: String,
    description: String,
    budget_cents: Option<u64>,
    due_date: Option<NaiveDate>,
}

impl CreateProjectRequest {
    /// Creates a request for a project of `client_id`.
    #[must_use]
    pub fn new(client_id: ClientId, name: impl Into<String>) -> Self {
        Self {
            client_id,
            name: name.into(),
            description: String::new(),
            budget_cents: None,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the agreed budget.
    #[must_use]
    pub const fn with_budget_cents(mut self, cents: u64) -> Self {
        self.budget_cents = Some(cents);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// Project repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryRepositoryError),
    /// The actor's role does not allow the operation.
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),
    /// The project does not exist or is not visible to the actor.
    #[error("project not found: {0}")]
    NotFound(ProjectId),
    /// The referenced client does not exist.
    #[error("client not found: {0}")]
    UnknownClient(ClientId),
    /// The user cannot be put on a project team.
    #[error("user {0} is not an active staff member")]
    InvalidMember(UserId),
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project lifecycle service.
#[derive(Clone)]
pub struct ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    directory: Arc<dyn DirectoryRepository>,
    notifier: Arc<dyn NotificationSink>,
    clock: Arc<C>,
}

impl<R, C> ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        directory: Arc<dyn DirectoryRepository>,
        notifier: Arc<dyn NotificationSink>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            directory,
            notifier,
            clock,
        }
    }

    /// Creates a project for an existing client.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::AccessDenied`] for client users,
    /// [`ProjectServiceError::UnknownClient`] for a missing tenant and
    /// [`ProjectServiceError::Domain`] for an invalid name.
    pub async fn create(
        &self,
        actor: &Actor,
        request: CreateProjectRequest,
    ) -> ProjectServiceResult<Project> {
        AccessPolicy::require_staff(actor)?;
        let CreateProjectRequest {
            client_id,
            name,
            description,
            budget_cents,
            due_date,
        } = request;

        if self.directory.find_client(client_id).await?.is_none() {
            return Err(ProjectServiceError::UnknownClient(client_id));
        }
        let mut project =
            Project::new(client_id, ProjectName::new(name)?, description, &*self.clock);
        if let Some(cents) = budget_cents {
            project = project.with_budget_cents(cents);
        }
        if let Some(due) = due_date {
            project = project.with_due_date(due);
        }
        self.repository.store(&project).await?;
        info!(project_id = %project.id(), client_id = %client_id, "created project");
        Ok(project)
    }

    /// Lists the projects the actor may see.
    ///
    /// Client users are confined to their own tenant whatever `filter` says.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when lookup fails.
    pub async fn list_visible(
        &self,
        actor: &Actor,
        filter: ProjectFilter,
    ) -> ProjectServiceResult<Vec<Project>> {
        let scoped = if actor.is_staff() {
            filter
        } else {
            let Some(tenant) = actor.client_id() else {
                return Ok(Vec::new());
            };
            if filter.client_id.is_some_and(|requested| requested != tenant) {
                return Ok(Vec::new());
            }
            filter.for_client(tenant)
        };
        Ok(self.repository.list(scoped).await?)
    }

    /// Lists one client's projects for its portal.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::AccessDenied`] when the actor may not
    /// view the client.
    pub async fn list_for_client(
        &self,
        actor: &Actor,
        client_id: ClientId,
    ) -> ProjectServiceResult<Vec<Project>> {
        if !AccessPolicy::can_view_client(actor, client_id) {
            return Err(AccessDenied::new(format!("cannot view client {client_id}")).into());
        }
        Ok(self
            .repository
            .list(ProjectFilter::any().for_client(client_id))
            .await?)
    }

    /// Lists the projects the actor is staffed on.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::AccessDenied`] for client users.
    pub async fn list_assigned(&self, actor: &Actor) -> ProjectServiceResult<Vec<Project>> {
        AccessPolicy::require_staff(actor)?;
        Ok(self
            .repository
            .list(ProjectFilter::any().with_member(actor.user_id()))
            .await?)
    }

    /// Finds a project visible to the actor.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project is missing
    /// or belongs to another tenant.
    pub async fn find(&self, actor: &Actor, id: ProjectId) -> ProjectServiceResult<Project> {
        self.repository
            .find_by_id(id)
            .await?
            .filter(|project| AccessPolicy::can_view_client(actor, project.client_id()))
            .ok_or(ProjectServiceError::NotFound(id))
    }

    /// Moves a project through its lifecycle and notifies the client's users
    /// and the team.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::AccessDenied`] for client users and
    /// [`ProjectServiceError::Domain`] for a disallowed transition.
    pub async fn change_status(
        &self,
        actor: &Actor,
        id: ProjectId,
        status: ProjectStatus,
    ) -> ProjectServiceResult<Project> {
        AccessPolicy::require_staff(actor)?;
        let (project, previous) = self
            .modify(id, |project| {
                Ok(project.change_status(status, &*self.clock)?)
            })
            .await?;
        info!(project_id = %id, from = %previous, to = %status, "project status changed");

        let notice = Notice::new(NotificationKind::ProjectStatusChanged)
            .with("project", project.name().as_str())
            .with("previous", previous.as_str())
            .with("status", status.as_str())
            .with_link(format!("/projects/{id}"));
        self.notify_stakeholders(actor, &project, &notice).await?;
        Ok(project)
    }

    /// Records a completion percentage.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::AccessDenied`] for client users and
    /// [`ProjectServiceError::Domain`] for an out-of-range value or a closed
    /// project.
    pub async fn update_progress(
        &self,
        actor: &Actor,
        id: ProjectId,
        percent: u8,
    ) -> ProjectServiceResult<Project> {
        AccessPolicy::require_staff(actor)?;
        let progress = Progress::new(percent)?;
        let (project, ()) = self
            .modify(id, |project| {
                Ok(project.update_progress(progress, &*self.clock)?)
            })
            .await?;
        Ok(project)
    }

    /// Puts an active staff member on the project team. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::InvalidMember`] when the user is
    /// missing, inactive or a client user.
    pub async fn assign_member(
        &self,
        actor: &Actor,
        id: ProjectId,
        user_id: UserId,
    ) -> ProjectServiceResult<Project> {
        AccessPolicy::require_staff(actor)?;
        self.load(id).await?;
        let eligible = self
            .directory
            .find_user(user_id)
            .await?
            .is_some_and(|user| user.is_active() && user.role().is_staff());
        if !eligible {
            return Err(ProjectServiceError::InvalidMember(user_id));
        }
        let (project, added) = self
            .modify(id, |project| {
                Ok(project.assign_member(user_id, &*self.clock))
            })
            .await?;
        if added {
            info!(project_id = %id, %user_id, "assigned team member");
        }
        Ok(project)
    }

    /// Returns every project, for administrative reporting.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::AccessDenied`] for non-admins.
    pub async fn list_all(&self, actor: &Actor) -> ProjectServiceResult<Vec<Project>> {
        AccessPolicy::require_admin(actor)?;
        Ok(self.repository.list(ProjectFilter::any()).await?)
    }

    async fn load(&self, id: ProjectId) -> ProjectServiceResult<Project> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProjectServiceError::NotFound(id))
    }

    /// Applies `change` to the latest stored copy, re-reading and re-applying
    /// when another writer got there first. Unchanged projects are not
    /// written.
    async fn modify<T, F>(
        &self,
        id: ProjectId,
        mut change: F,
    ) -> ProjectServiceResult<(Project, T)>
    where
        T: Send,
        F: FnMut(&mut Project) -> ProjectServiceResult<T> + Send,
    {
        for _ in 0..MAX_UPDATE_ATTEMPTS {
            let loaded = self.load(id).await?;
            let mut project = loaded.clone();
            let outcome = change(&mut project)?;
            if project == loaded {
                return Ok((project, outcome));
            }
            match self.repository.update(&project).await {
                Ok(stored) => return Ok((stored, outcome)),
                Err(ProjectRepositoryError::Conflict(_)) => {
                    debug!(project_id = %id, "retrying project update after conflict");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(ProjectRepositoryError::Conflict(id).into())
    }

    async fn notify_stakeholders(
        &self,
        actor: &Actor,
        project: &Project,
        notice: &Notice,
    ) -> ProjectServiceResult<()> {
        let mut recipients: BTreeSet<UserId> = self
            .directory
            .users_of_client(project.client_id())
            .await?
            .iter()
            .filter(|user| user.is_active())
            .map(User::id)
            .collect();
        recipients.extend(project.team().iter().copied());
        recipients.remove(&actor.user_id());

        for recipient in recipients {
            if let Err(err) = self.notifier.deliver(recipient, notice.clone()).await {
                warn!(project_id = %project.id(), %recipient, error = %err, "notification dropped");
            }
        }
        Ok(())
    }
}
